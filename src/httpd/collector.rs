// This trait must be implemented so the HTTPd can export metrics
use super::errors::HttpdError;
use std::future::Future;

pub trait Collector: Send + Sync + 'static {
    fn collect(&self)
    -> impl Future<Output = Result<String, HttpdError>> + Send;
}
