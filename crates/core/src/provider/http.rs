//! HTTP client abstraction so provider code can be exercised without a network.

use std::time::Duration;

use tracing::trace;

use super::types::ProviderError;

/// Blocking HTTP GET used by the provider and location clients.
pub trait HttpClient: Send + Sync {
	/// Fetch `url` and return the response body.
	fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError>;
}

const USER_AGENT: &str = concat!("nearby/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] backed by `reqwest`'s blocking client.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
	client: reqwest::blocking::Client,
}

impl ReqwestClient {
	pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
		let client = reqwest::blocking::Client::builder()
			.timeout(timeout)
			.user_agent(USER_AGENT)
			.build()
			.map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {e}")))?;

		Ok(Self { client })
	}
}

impl HttpClient for ReqwestClient {
	fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
		trace!(url = redact_key(url), "GET");
		let response = self
			.client
			.get(url)
			.send()
			.map_err(|e| ProviderError::Http(format!("request failed: {e}")))?;

		if !response.status().is_success() {
			return Err(ProviderError::Http(format!(
				"HTTP {} from {}",
				response.status(),
				redact_key(url)
			)));
		}

		response
			.bytes()
			.map(|b| b.to_vec())
			.map_err(|e| ProviderError::Http(format!("failed to read response: {e}")))
	}
}

/// Mask every `key` query parameter before a URL reaches logs or errors.
///
/// A URL that does not parse loses its whole query instead.
pub(crate) fn redact_key(url: &str) -> String {
	let Ok(mut parsed) = reqwest::Url::parse(url) else {
		return url.split_once('?').map_or(url, |(base, _)| base).to_string();
	};
	if parsed.query().is_none() {
		return parsed.into();
	}
	let pairs: Vec<(String, String)> = parsed
		.query_pairs()
		.map(|(name, value)| {
			let value = if name == "key" {
				"REDACTED".to_string()
			} else {
				value.into_owned()
			};
			(name.into_owned(), value)
		})
		.collect();
	parsed.query_pairs_mut().clear().extend_pairs(pairs);
	parsed.into()
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn redacts_api_key() {
		assert_eq!(
			redact_key("https://x/json?location=1,2&key=secret&radius=5"),
			"https://x/json?location=1%2C2&key=REDACTED&radius=5"
		);
		assert_eq!(redact_key("https://x/json"), "https://x/json");
	}

	#[test]
	fn redacts_repeated_and_encoded_keys() {
		assert_eq!(
			redact_key("https://x/json?key=a&input=cafe&key=b"),
			"https://x/json?key=REDACTED&input=cafe&key=REDACTED"
		);
		assert_eq!(redact_key("https://x/json?%6Bey=secret"), "https://x/json?key=REDACTED");
	}

	#[test]
	fn unparsable_url_loses_its_query() {
		assert_eq!(redact_key("not a url?key=secret"), "not a url");
	}
}
