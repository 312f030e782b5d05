//! Utility functions

/// Hides the password of a connection URL so it can be logged.
pub fn mask_url_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or("");
            format!("{}://{}:***@{}", scheme, user, host)
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_url_credentials() {
        assert_eq!(
            mask_url_credentials("postgres://menu:s3cret@db:5432/menu"),
            "postgres://menu:***@db:5432/menu"
        );
        assert_eq!(
            mask_url_credentials("postgres://localhost/menu"),
            "postgres://localhost/menu"
        );
        assert_eq!(mask_url_credentials("not a url"), "not a url");
    }
}
