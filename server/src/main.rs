#[tokio::main]
async fn main() {
    food_server::start_server().await;
}
