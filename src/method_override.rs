use axum::{extract::Request, http::Method};

const OVERRIDE_PARAM: &str = "_method";

/// HTML forms can only GET or POST. A POST carrying `?_method=PUT` (or
/// DELETE, PATCH) in its query string is routed as that method instead.
pub fn override_method(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }
    if let Some(method) = req.uri().query().and_then(requested_method) {
        log::debug!("overriding POST {} as {}", req.uri().path(), method);
        *req.method_mut() = method;
    }
    req
}

fn requested_method(query: &str) -> Option<Method> {
    let (_, value) = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == OVERRIDE_PARAM)?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}
