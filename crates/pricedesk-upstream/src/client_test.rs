use super::*;

fn client(base_url: &str) -> UpstreamClient {
    UpstreamClient::new(base_url, 5, "pricedesk-test/0.1", 0, 0).unwrap()
}

#[test]
fn products_url_carries_select_limit_and_skip() {
    let url = client("https://dummyjson.com")
        .products_url(60, 30, &["title", "price", "brand", "category"])
        .unwrap();
    assert_eq!(
        url,
        "https://dummyjson.com/auth/products?select=title%2Cprice%2Cbrand%2Ccategory&limit=30&skip=60"
    );
}

#[test]
fn products_url_omits_empty_select() {
    let url = client("https://dummyjson.com").products_url(0, 10, &[]).unwrap();
    assert_eq!(url, "https://dummyjson.com/auth/products?limit=10&skip=0");
}

#[test]
fn base_url_trailing_slash_is_stripped() {
    let c = client("https://dummyjson.com/");
    assert_eq!(c.base_url(), "https://dummyjson.com");
    assert_eq!(c.login_url().unwrap(), "https://dummyjson.com/auth/login");
    assert_eq!(
        c.product_url(42).unwrap(),
        "https://dummyjson.com/auth/products/42"
    );
}

#[test]
fn base_url_path_prefix_is_kept() {
    let c = client("http://127.0.0.1:8080/mirror");
    assert_eq!(c.users_url().unwrap(), "http://127.0.0.1:8080/mirror/users");
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = UpstreamClient::new("not-a-url", 5, "ua", 0, 0);
    assert!(matches!(result, Err(UpstreamError::InvalidBaseUrl { .. })));
}

#[test]
fn new_rejects_non_http_scheme() {
    let result = UpstreamClient::new("ftp://dummyjson.com", 5, "ua", 0, 0);
    match result {
        Err(UpstreamError::InvalidBaseUrl { reason, .. }) => {
            assert!(reason.contains("ftp"), "unexpected reason: {reason}");
        }
        _ => panic!("expected InvalidBaseUrl"),
    }
}
