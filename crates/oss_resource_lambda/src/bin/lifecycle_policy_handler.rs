use lambda_runtime::Error;
use oss_resource_lambda::handlers::ResourceKind;
use oss_resource_lambda::runtime::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    serve(ResourceKind::LifecyclePolicy).await
}
