use crate::error::{FileError, RequestError};
use crate::types::HttpClient;
use std::path::Path;
use reqwest::header;
use reqwest_middleware::ClientBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use lazy_regex::{regex_captures, regex_is_match};

pub const COMMUNITY_URL: &str = "https://steamcommunity.com";
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Builds the default client used for requests.
pub fn get_default_client(
    user_agent_string: &'static str,
) -> Result<HttpClient, reqwest::Error> {
    let mut headers = header::HeaderMap::new();
    
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));
    
    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .build()?;
    
    Ok(ClientBuilder::new(client).build())
}

/// Joins cookies into the value of a `Cookie` header.
pub fn join_cookies(cookies: &[String]) -> String {
    cookies.join("; ")
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

/// Extracts the message from an error body e.g. `{"strError":"You cannot trade with..."}`.
fn get_error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(rename = "strError")]
        str_error: String,
    }
    
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.str_error)
}

/// Checks the status of a response and reads its body.
pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, RequestError> {
    let status = response.status();
    
    match status.as_u16() {
        300..=399 if is_login(response.headers().get(header::LOCATION)) => {
            Err(RequestError::NotLoggedIn)
        },
        400..=599 => {
            let body = response.bytes().await?;
            
            if let Some(message) = get_error_message(&body) {
                return Err(RequestError::Response(message));
            }
            
            Err(RequestError::Http(status))
        },
        _ => {
            Ok(response.bytes().await?)
        },
    }
}

/// Checks and parses a JSON response. HTML pages Steam serves in place of JSON are converted into
/// errors where the page is recognized.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, RequestError>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;
    
    match serde_json::from_slice::<D>(&body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(&body);
            
            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(RequestError::Response(message.into()))
                } else {
                    Err(RequestError::Response("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(RequestError::NotLoggedIn)
            } else if let Some((_, message)) = regex_captures!(r#"<div id="error_msg">\s*([^<]+)\s*</div>"#, &html) {
                Err(RequestError::Response(message.trim().into()))
            } else {
                Err(RequestError::Parse(parse_error))
            }
        },
    }
}

/// Writes a file by writing to a temporary file first, then renaming it into place, so readers
/// never see a partially written file.
pub async fn write_file_atomic(
    filepath: &Path,
    bytes: &[u8],
) -> Result<(), FileError> {
    let filename = filepath.file_name()
        .ok_or(FileError::PathError)?
        .to_string_lossy();
    let temp_filepath = filepath.with_file_name(format!(".{filename}.tmp"));
    
    async_fs::write(&temp_filepath, bytes).await?;
    
    if let Err(error) = async_fs::rename(&temp_filepath, filepath).await {
        let _ = async_fs::remove_file(&temp_filepath).await;
        
        return Err(error.into());
    }
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn joins_cookies_into_header() {
        let cookies = vec![
            "sessionid=37bf523a24034ec06c60ec61".to_string(),
            "steamLoginSecure=token".to_string(),
        ];
        
        assert_eq!(join_cookies(&cookies), "sessionid=37bf523a24034ec06c60ec61; steamLoginSecure=token");
    }
    
    #[test]
    fn gets_error_message_from_body() {
        let body = br#"{"strError":"There was an error sending your trade offer. (15)"}"#;
        
        assert_eq!(
            get_error_message(body).as_deref(),
            Some("There was an error sending your trade offer. (15)"),
        );
        assert_eq!(get_error_message(b"null"), None);
    }
    
    #[tokio::test]
    async fn writes_file_atomically() {
        let temp_dir = tempfile::tempdir().unwrap();
        let filepath = temp_dir.path().join("code.txt");
        
        write_file_atomic(&filepath, b"ABCDE").await.unwrap();
        
        assert_eq!(async_fs::read_to_string(&filepath).await.unwrap(), "ABCDE");
        // The temporary file was renamed into place.
        assert!(async_fs::metadata(temp_dir.path().join(".code.txt.tmp")).await.is_err());
    }
}
