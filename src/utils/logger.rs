use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未設定 `RUST_LOG` 時的過濾規則；其他 crate 只留 warn 以上
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,order_receipt=debug,lambda_runtime=info"
    } else {
        "warn,order_receipt=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// `order_id` 等欄位攤平到 JSON 最上層，方便在 CloudWatch 以欄位查詢
pub fn init_lambda_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
    }

    #[test]
    fn test_verbose_enables_debug_for_this_crate_only() {
        assert!(default_directives(true).contains("order_receipt=debug"));
        assert!(default_directives(false).contains("order_receipt=info"));
        assert!(!default_directives(false).contains("debug"));
        assert!(default_directives(false).starts_with("warn"));
    }
}
