use crate::error::BotError;
use botpicks_schema::SendMessage;
use url::Url;

pub struct TelegramApi;

impl TelegramApi {
    /// `{api_base}/bot{token}/{method}`.
    ///
    /// Built from path segments rather than `Url::join`: tokens contain `:`, which a
    /// relative reference would read as a scheme.
    pub fn method_url(api_base: &Url, token: &str, method: &str) -> Result<Url, BotError> {
        let mut url = api_base.clone();
        url.path_segments_mut()
            .map_err(|_| BotError::UrlError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&format!("bot{token}"))
            .push(method);
        Ok(url)
    }

    pub fn build_send_message_request(
        client: &reqwest::Client,
        api_base: &Url,
        token: &str,
        body: &SendMessage,
    ) -> Result<reqwest::Request, BotError> {
        let url = Self::method_url(api_base, token, "sendMessage")?;
        Ok(client.post(url).json(body).build()?)
    }
}
