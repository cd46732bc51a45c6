#[tokio::main]
async fn main() {
    book_orders::start_server().await;
}
