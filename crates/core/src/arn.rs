//! ARN parsing and construction helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AwsContext;
use crate::error::CoreError;

/// A parsed Amazon Resource Name.
///
/// Only the generic `arn:partition:service:region:account:resource` shape is
/// understood; resource-type subfields stay inside `resource` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN string into its components.
    ///
    /// The region and account fields may be empty (some services, e.g. S3,
    /// omit them), but partition, service, and resource must be present.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let malformed = |reason: &str| CoreError::MalformedArn {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = value.splitn(6, ':');
        let head = parts.next().unwrap_or_default();
        if head != "arn" {
            return Err(malformed("must start with 'arn:'"));
        }

        let partition = parts.next().ok_or_else(|| malformed("missing partition"))?;
        let service = parts.next().ok_or_else(|| malformed("missing service"))?;
        let region = parts.next().ok_or_else(|| malformed("missing region field"))?;
        let account_id = parts.next().ok_or_else(|| malformed("missing account field"))?;
        let resource = parts.next().ok_or_else(|| malformed("missing resource"))?;

        if partition.is_empty() {
            return Err(malformed("empty partition"));
        }
        if service.is_empty() {
            return Err(malformed("empty service"));
        }
        if resource.is_empty() {
            return Err(malformed("empty resource"));
        }

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

/// Construct the ARN of an EventBridge rule in the given deployment context.
pub fn events_rule_arn(ctx: &AwsContext, rule_name: &str) -> String {
    format!(
        "arn:{}:events:{}:{}:rule/{}",
        ctx.partition, ctx.region, ctx.account_id, rule_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AwsContext;

    #[test]
    fn parse_lambda_arn() {
        let arn = Arn::parse("arn:aws:lambda:sa-east-1:123456789012:function:daily-report").unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "lambda");
        assert_eq!(arn.region, "sa-east-1");
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(arn.resource, "function:daily-report");
    }

    #[test]
    fn parse_allows_empty_region_and_account() {
        let arn = Arn::parse("arn:aws:s3:::my-bucket").unwrap();
        assert_eq!(arn.service, "s3");
        assert!(arn.region.is_empty());
        assert!(arn.account_id.is_empty());
        assert_eq!(arn.resource, "my-bucket");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Arn::parse("not-an-arn").is_err());
        assert!(Arn::parse("arn:aws:lambda").is_err());
        assert!(Arn::parse("arn::lambda:us-east-1:1:fn").is_err());
    }

    #[test]
    fn display_round_trips() {
        let text = "arn:aws:events:sa-east-1:123456789012:rule/my-rule";
        assert_eq!(Arn::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn rule_arn_uses_context() {
        let ctx = AwsContext {
            partition: "aws".into(),
            region: "sa-east-1".into(),
            account_id: "123456789012".into(),
        };
        assert_eq!(
            events_rule_arn(&ctx, "crb-acme-prd-daily-report"),
            "arn:aws:events:sa-east-1:123456789012:rule/crb-acme-prd-daily-report"
        );
    }
}
