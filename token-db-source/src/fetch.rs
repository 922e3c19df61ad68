use crate::error::SourceError;

/// Community-maintained token list published for Cockatrice.
pub const TOKENS_XML_URL: &str =
    "https://raw.githubusercontent.com/Cockatrice/Magic-Token/master/tokens.xml";

/// Download the token XML document.
///
/// One blocking GET with no retry. Transport errors and non-success statuses
/// are both fatal to the caller.
pub fn fetch_xml(url: &str) -> Result<String, SourceError> {
    log::debug!("GET {url}");
    let response = reqwest::blocking::get(url)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::download(format!("HTTP {status} for {url}")));
    }

    let body = response.text()?;
    log::debug!("Received {} bytes from {url}", body.len());
    Ok(body)
}
