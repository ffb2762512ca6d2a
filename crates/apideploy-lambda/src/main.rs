// AWS Lambda binary entry point
//
// Build with: cargo build -p apideploy-lambda
//
// The lambda_runtime crate drives the tokio runtime, so we use #[tokio::main]

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    apideploy_lambda::run().await
}
