//! Liveness page.
//!
//! Hosting platforms poll `GET /` to decide whether the process is alive.
//! The page is static and carries no command state.

use axum::response::Html;

pub const LIVENESS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Celestia Bot</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <style>
    body { background: #a8dadc; color: #1d3557; font-family: Arial, sans-serif; text-align: center; }
    h1 { color: #457b9d; }
  </style>
</head>
<body>
  <h1>Celestia Bot is Online!</h1>
</body>
</html>
"#;

/// Handler for `GET /`
pub async fn liveness() -> Html<&'static str> {
    Html(LIVENESS_PAGE)
}
