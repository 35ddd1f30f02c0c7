//! End-to-end run: the manager drives the real server over HTTP.

use food_manager::{Field, HttpFoodApi, ListManager};
use food_server::{
    app,
    config::Config,
    database::{FoodStore, init_db},
    state::AppState,
};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let pool = init_db("sqlite::memory:").await;
    let config = Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        seed: false,
    };
    let router = app(AppState::with_store(config, FoodStore::new(pool)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

#[tokio::test]
async fn full_crud_cycle_over_http() {
    let api = HttpFoodApi::new(spawn_server().await);
    let mut manager = ListManager::new();

    manager.refresh(&api).await;
    assert!(manager.collection().is_empty());

    // Create.
    manager.open_create();
    manager.set_field(Field::Name, "Tacos");
    manager.set_field(Field::Category, "Mexican");
    manager.set_field(Field::Calories, "300");
    manager.set_field(Field::Price, "95.00");
    manager.set_field(Field::AvailableDate, "2025-05-18");
    manager.submit(&api).await;

    assert!(!manager.is_form_open());
    assert_eq!(manager.collection().len(), 1);
    let food = manager.collection()[0].clone();
    assert_eq!(food.name, "Tacos");
    assert_eq!(food.price, 95.0);

    // A failed submit renders the server's per-field reasons.
    manager.open_create();
    manager.set_field(Field::Name, "");
    manager.submit(&api).await;
    assert!(manager.is_form_open());
    let errors = manager.field_errors().unwrap();
    assert!(errors["name"][0].contains("required"));
    manager.close_form();

    // Edit one field; the others survive on the server.
    manager.open_edit(&food);
    manager.set_field(Field::Price, "120.50");
    manager.submit(&api).await;
    assert_eq!(manager.collection()[0].price, 120.50);
    assert_eq!(manager.collection()[0].name, "Tacos");

    // Confirmed delete empties the list.
    manager.request_delete(food.id);
    manager.delete_confirmed(&api).await;
    assert!(manager.collection().is_empty());
    assert!(manager.notice().is_none());
}

#[tokio::test]
async fn deleting_an_already_gone_record_surfaces_a_notice() {
    let api = HttpFoodApi::new(spawn_server().await);
    let mut manager = ListManager::new();

    manager.request_delete(999);
    manager.delete_confirmed(&api).await;

    assert!(manager.notice().is_some());
    assert!(manager.collection().is_empty());
}
