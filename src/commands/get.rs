//! `bl get` - fetch one resource or list a kind.

use serde_json::Value;

use crate::config::Context;
use crate::error::{report_api_error, Error};
use crate::render;
use crate::resource::Registry;

/// Get one named resource or list a kind. These are single-target reads: an
/// HTTP failure or an undecodable body aborts the whole command rather than
/// being isolated per item.
pub async fn run(
    registry: &Registry,
    ctx: &Context,
    kind: &str,
    name: Option<&str>,
) -> Result<(), Error> {
    let descriptor = registry
        .lookup(kind)
        .ok_or_else(|| Error::Lookup(kind.to_string()))?;
    let options = ctx.options();

    let records: Vec<Value> = match name {
        Some(name) => {
            let response = descriptor.ops.get(name, &options).await?;
            if response.status >= 400 {
                report_api_error(descriptor.kind, name, &response.body_text());
                return Err(Error::HttpStatus {
                    status: response.status,
                    body: response.body_text(),
                });
            }
            let record =
                serde_json::from_slice::<Value>(&response.body).map_err(|e| Error::Decode {
                    expected: "resource object",
                    detail: e.to_string(),
                })?;
            vec![record]
        }
        None => {
            let response = descriptor.ops.list(&options).await?;
            if response.status >= 400 {
                report_api_error(descriptor.kind, "", &response.body_text());
                return Err(Error::HttpStatus {
                    status: response.status,
                    body: response.body_text(),
                });
            }
            serde_json::from_slice::<Vec<Value>>(&response.body).map_err(|e| Error::Decode {
                expected: "resource list",
                detail: e.to_string(),
            })?
        }
    };

    render::output(descriptor.kind, &records, ctx.output)
}
