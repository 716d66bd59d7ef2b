//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::Client;

/// Where a DynamoDB client connects, and as whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTarget<'a> {
    pub region: &'a str,
    /// Named credentials profile.
    pub profile: Option<&'a str>,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<&'a str>,
}

/// Creates a DynamoDB client for `target`.
///
/// Credentials come from the SDK default chain, narrowed to the profile when
/// one is set.
pub async fn create_client(target: ClientTarget<'_>) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(target.region.to_string()));

    if let Some(profile) = target.profile {
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint) = target.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_client_uses_region() {
        let client = create_client(ClientTarget {
            region: "eu-west-1",
            profile: None,
            endpoint_url: Some("http://localhost:8000"),
        })
        .await;

        assert_eq!(
            client.config().region().map(ToString::to_string),
            Some("eu-west-1".to_string())
        );
    }
}
