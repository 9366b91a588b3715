#[tokio::main]
async fn main() {
    hobby_planner_backend::run().await;
}
