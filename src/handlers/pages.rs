use actix_web::HttpResponse;

const LANDING_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Centro de Alquiler</title>
</head>
<body>
    <main>
        <h1>Centro de Alquiler</h1>
        <p>Gestión de reservas y entregas para tu negocio de alquiler.</p>
        <a href="/login">Iniciar sesión</a>
    </main>
</body>
</html>
"#;

/// GET /
///
/// Static entry page with a single link into the login flow.
pub async fn landing() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(LANDING_HTML)
}
