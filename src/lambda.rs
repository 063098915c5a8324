#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use order_receipt::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use order_receipt::{build_dispatcher, handle_payload, InvocationResponse, LiveDispatcher, ReceiptConfig};

#[cfg(feature = "lambda")]
async fn function_handler(
    dispatcher: &LiveDispatcher,
    event: LambdaEvent<serde_json::Value>,
) -> Result<InvocationResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Order receipt trigger received");

    // 任何結果都回 Ok，避免觸發端重送造成重複寄信
    let response = handle_payload(dispatcher, event.payload).await;

    tracing::info!(status = response.status, "Order receipt trigger completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    // 設定與 client 只在冷啟動時建立一次；logger 依設定決定詳細程度
    let config = ReceiptConfig::load(None)?;
    logger::init_lambda_logger(config.verbose_logging);
    config.validate()?;
    let dispatcher = build_dispatcher(&config);
    let dispatcher = &dispatcher;

    run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        function_handler(dispatcher, event).await
    }))
    .await
}
