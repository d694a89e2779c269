use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use profile_intake::config::lambda::{handle_event, HttpRequestEvent, HttpResponse, LambdaConfig};
use profile_intake::utils::logger::{self, LogFormat};
use profile_intake::utils::validation::Validate;
use profile_intake::RequestFieldResolver;

async fn function_handler(
    resolver: &RequestFieldResolver,
    event: LambdaEvent<HttpRequestEvent>,
) -> Result<HttpResponse, Error> {
    let response = handle_event(resolver, &event.payload)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_logger(LogFormat::Json, false);

    // 從環境變量建立配置
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let resolver = RequestFieldResolver::from_config(&lambda_config)?;
    let resolver = &resolver;

    run(service_fn(move |event: LambdaEvent<HttpRequestEvent>| async move {
        function_handler(resolver, event).await
    }))
    .await
}
