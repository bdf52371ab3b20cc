#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    exam_api::start_server().await
}
