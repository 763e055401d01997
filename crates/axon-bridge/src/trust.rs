//! Origin trust validation
//!
//! Decides whether a bridge request may drive the native clipboard. Pure
//! host matching against a fixed allow-list; no network, no caching, a
//! fresh decision per request.

use url::Url;

/// Hosts allowed to use the clipboard bridge: the service apex, its
/// corporate apex, and its static-asset apex, each including subdomains.
const TRUSTED_HOSTS: &[&str] = &["chatgpt.com", "openai.com", "oaistatic.com"];

/// Check a bare host against the allow-list.
///
/// Subdomain matching is exact suffix match on a dot boundary:
/// `chat.chatgpt.com` passes, `notchatgpt.com` and `chatgpt.com.evil.net`
/// do not.
pub fn is_trusted_host(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }

    let host = host.to_ascii_lowercase();
    TRUSTED_HOSTS.iter().any(|trusted| {
        host == *trusted
            || host
                .strip_suffix(trusted)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Decide trust for a bridge request.
///
/// `origin` is the claim carried by the transport, `None` when the claim
/// did not parse. `current_page_host` is the host of the top-level page,
/// used when the claim is unusable: `about`, `data` and empty origins
/// appear during frame transitions and carry no meaningful host.
pub fn is_trusted_origin(origin: Option<&Url>, current_page_host: &str) -> bool {
    let Some(origin) = origin else {
        return is_trusted_host(current_page_host);
    };

    match origin.scheme() {
        "https" => is_trusted_host(origin.host_str().unwrap_or_default()),
        // Blob URLs can wrap trusted HTTPS origins
        "blob" => match wrapped_https_host(origin) {
            Some(host) => is_trusted_host(&host),
            None => is_trusted_host(current_page_host),
        },
        _ => is_trusted_host(current_page_host),
    }
}

fn wrapped_https_host(origin: &Url) -> Option<String> {
    let wrapped = origin.as_str().strip_prefix("blob:https://")?;
    let inner = Url::parse(&format!("https://{wrapped}")).ok()?;
    inner.host_str().map(|host| host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(origin: &str) -> Option<Url> {
        Url::parse(origin).ok()
    }

    #[test]
    fn test_allow_listed_hosts() {
        assert!(is_trusted_host("chatgpt.com"));
        assert!(is_trusted_host("chat.chatgpt.com"));
        assert!(is_trusted_host("openai.com"));
        assert!(is_trusted_host("cdn.oaistatic.com"));
        assert!(is_trusted_host("ChatGPT.com"));

        assert!(!is_trusted_host("notchatgpt.com"));
        assert!(!is_trusted_host("chatgpt.com.evil.net"));
        assert!(!is_trusted_host("evil.net"));
        assert!(!is_trusted_host(""));
    }

    #[test]
    fn test_https_origin_uses_claimed_host() {
        let origin = parsed("https://chatgpt.com");
        assert!(is_trusted_origin(origin.as_ref(), "evil.net"));

        let origin = parsed("https://evil.net");
        assert!(!is_trusted_origin(origin.as_ref(), "chatgpt.com"));
    }

    #[test]
    fn test_blob_origin_unwraps_https() {
        let origin = parsed("blob:https://chatgpt.com/0a1b2c3d");
        assert!(is_trusted_origin(origin.as_ref(), "evil.net"));

        // An untrusted wrapped host must not fall through to the page host
        let origin = parsed("blob:https://evil.net/0a1b2c3d");
        assert!(!is_trusted_origin(origin.as_ref(), "chatgpt.com"));
    }

    #[test]
    fn test_transition_origins_fall_back_to_page_host() {
        for claim in ["about:blank", "data:text/html,x"] {
            let origin = parsed(claim);
            assert!(is_trusted_origin(origin.as_ref(), "chatgpt.com"));
            assert!(!is_trusted_origin(origin.as_ref(), "evil.net"));
        }

        // Unparseable claims behave the same way
        assert!(is_trusted_origin(None, "chat.chatgpt.com"));
        assert!(!is_trusted_origin(None, "evil.net"));
    }
}
