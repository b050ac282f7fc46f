use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::{excerpt, format_date, PageSettings};
use crate::models::{Post, PostWithAuthor, User, UserId};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #333; }
.container { max-width: 800px; margin: 0 auto; padding: 2rem; }
.title { margin: 0; font-size: 3rem; text-align: center; }
.create-post-link { display: block; margin: 1rem 0 2rem; font-size: 1.2rem; color: #0070f3; text-align: center; }
.post-card { margin: 1rem 0; padding: 1.5rem; border: 1px solid #eaeaea; border-radius: 10px; }
.post-card:hover { border-color: #0070f3; }
.post-card h2 { margin: 0 0 1rem 0; font-size: 1.5rem; }
.post-card a { color: inherit; text-decoration: none; }
.date, .author { color: #666; font-size: 1rem; }
.content { line-height: 1.6; white-space: pre-wrap; }
form { display: flex; flex-direction: column; }
label { margin-bottom: 0.5rem; color: #666; }
input, textarea, select { margin-bottom: 1rem; padding: 0.5rem; border: 1px solid #ddd; border-radius: 4px; }
textarea { height: 200px; }
button { padding: 0.5rem 1rem; background-color: #0070f3; color: white; border: none; border-radius: 4px; cursor: pointer; }
.error { padding: 0.75rem; border: 1px solid #e00; border-radius: 4px; color: #e00; background: #fff5f5; }
footer { text-align: center; color: #999; padding: 2rem 0; }
"#;

/// Values echoed back into the create-post form, plus an optional error.
#[derive(Debug, Clone, Default)]
pub struct CreatePostForm {
    pub title: String,
    pub content: String,
    pub author_id: Option<UserId>,
    pub error: Option<String>,
}

fn layout(settings: &PageSettings, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main.container { (body) }
                footer {
                    p { "© " (Utc::now().year()) " " (settings.site_title) }
                }
            }
        }
    }
}

fn post_href(post: &Post) -> String {
    format!("/posts/{}", post.id)
}

pub fn home_page(settings: &PageSettings, posts: &[Post]) -> Markup {
    layout(
        settings,
        &settings.site_title,
        html! {
            h1.title { "Welcome to " (settings.site_title) }
            a.create-post-link href="/admin/create-post" { "Create New Post" }
            div.posts {
                @for post in posts {
                    div.post-card {
                        a href=(post_href(post)) { h2 { (post.title) } }
                        p.date { (format_date(post.created_at)) }
                        p.excerpt { (excerpt(&post.content)) }
                    }
                }
                @if posts.is_empty() {
                    p.empty { "No posts yet." }
                }
            }
        },
    )
}

pub fn post_page(settings: &PageSettings, post: &PostWithAuthor) -> Markup {
    layout(
        settings,
        &post.post.title,
        html! {
            article {
                h1 { (post.post.title) }
                p.author { "By " (post.author.name) }
                p.date { (format_date(post.post.created_at)) }
                div.content { (post.post.content) }
            }
            p { a href="/" { "← Back to all posts" } }
        },
    )
}

pub fn create_post_page(
    settings: &PageSettings,
    form: &CreatePostForm,
    users: &[User],
    posts: &[Post],
) -> Markup {
    layout(
        settings,
        "Create New Post",
        html! {
            h1 { "Create New Post" }
            @if let Some(error) = &form.error {
                p.error role="alert" { (error) }
            }
            form method="post" action="/admin/create-post" {
                label for="title" { "Title:" }
                input type="text" id="title" name="title" value=(form.title) required;
                label for="content" { "Content:" }
                textarea id="content" name="content" required { (form.content) }
                label for="author_id" { "Author:" }
                select id="author_id" name="author_id" required {
                    @for user in users {
                        option value=(user.id) selected[form.author_id == Some(user.id)] {
                            (user.name)
                        }
                    }
                }
                button type="submit" { "Create Post" }
            }
            h2 { "Existing Posts" }
            ul {
                @for post in posts {
                    li { a href=(post_href(post)) { (post.title) } }
                }
            }
        },
    )
}

pub fn error_page(settings: &PageSettings, status: StatusCode, message: &str) -> Markup {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        settings,
        heading,
        html! {
            h1 { (status.as_u16()) " " (heading) }
            p.error { (message) }
            p { a href="/" { "← Back to all posts" } }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostAuthor;
    use chrono::TimeZone;

    fn post(id: i64, title: &str, content: &str) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Post {
            id,
            title: title.into(),
            content: content.into(),
            author_id: 2,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn home_lists_cards_with_excerpts() {
        let html = home_page(
            &PageSettings::default(),
            &[post(3, "Hello", &"x".repeat(120))],
        )
        .into_string();

        assert!(html.contains("Welcome to My Blog"));
        assert!(html.contains(r#"href="/posts/3""#));
        assert!(html.contains("2024-05-01"));
        assert!(html.contains(&format!("{}...", "x".repeat(100))));
        assert!(!html.contains(&"x".repeat(101)));
    }

    #[test]
    fn home_escapes_titles() {
        let html = home_page(&PageSettings::default(), &[post(1, "<script>x</script>", "c")])
            .into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn post_page_shows_author() {
        let html = post_page(
            &PageSettings::default(),
            &PostWithAuthor {
                post: post(1, "Hello", "World"),
                author: PostAuthor {
                    name: "Alice".into(),
                },
            },
        )
        .into_string();

        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("By Alice"));
        assert!(html.contains("World"));
    }

    #[test]
    fn form_echoes_values_and_error() {
        let users = [User {
            id: 2,
            name: "Alice".into(),
            created_at: Utc::now(),
        }];
        let form = CreatePostForm {
            title: "Draft".into(),
            content: "Body".into(),
            author_id: Some(2),
            error: Some("title cannot be empty".into()),
        };

        let html = create_post_page(&PageSettings::default(), &form, &users, &[]).into_string();
        assert!(html.contains("title cannot be empty"));
        assert!(html.contains(r#"value="Draft""#));
        assert!(html.contains(r#"<option value="2" selected>Alice</option>"#));
    }
}
