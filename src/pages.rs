//! Admin pages. Authentication failures on these routes redirect to the login page.

use axum::{Router, response::Html, routing::get};

use crate::auth::{AuthContext, CurrentUser};

/// Protected admin pages. The caller layers `require_auth` in redirect mode on top.
pub fn router() -> Router {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/all-blogs", get(all_blogs))
        .route("/blogs", get(blogs))
}

const LOGIN_PAGE: &str = r#"<!doctype html>
<html><head><title>Admin Login</title></head>
<body><main id="login">
<h1>Admin Login</h1>
<form id="login-form" method="post" action="/api/auth/login">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
<p id="login-error" role="alert"></p>
</form>
</main>
<script>
document.getElementById("login-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch("/api/auth/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    credentials: "same-origin",
    body: JSON.stringify({ username: form.get("username"), password: form.get("password") }),
  });
  if (response.ok) {
    window.location.assign("/admin/dashboard");
  } else {
    const body = await response.json().catch(() => ({}));
    document.getElementById("login-error").textContent = body.message || "Login failed";
  }
});
</script>
</body></html>"#;

/// Public login page. The form posts to `/api/auth/login`, which sets the session cookie.
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

async fn dashboard(CurrentUser(ctx): CurrentUser) -> Html<String> {
    admin_page("Dashboard", "Welcome to your admin dashboard", &ctx)
}

async fn all_blogs(CurrentUser(ctx): CurrentUser) -> Html<String> {
    admin_page("All Blogs", "All Blogs", &ctx)
}

async fn blogs(CurrentUser(ctx): CurrentUser) -> Html<String> {
    admin_page("Blogs", "Blogs", &ctx)
}

fn admin_page(title: &str, description: &str, ctx: &AuthContext) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><title>{title}</title></head>\
         <body><header data-user=\"{user}\" data-role=\"{role}\">Signed in as {user}</header>\
         <main><h1>{title}</h1><p>{description}</p></main></body></html>",
        title = title,
        description = description,
        user = escape_html(&ctx.username),
        role = ctx.role.as_str(),
    ))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
