//! Page files compiled into the binary.

macro_rules! asset {
    ($file:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/src/web/assets/", $file))
    };
}

pub const INDEX_HTML: &str = asset!("index.html");

pub struct Asset {
    pub body: &'static str,
    pub content_type: &'static str,
}

pub fn find(name: &str) -> Option<Asset> {
    let (body, content_type) = match name {
        "styles.css" => (asset!("styles.css"), "text/css; charset=utf-8"),
        "app.js" => (asset!("app.js"), "application/javascript; charset=utf-8"),
        _ => return None,
    };
    Some(Asset { body, content_type })
}
