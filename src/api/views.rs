//! Server-rendered pages. Deliberately bare: a heading, pending notices, and
//! the forms and links each role needs.

use crate::core::models::image::{ImageFeedback, ImageLink, path_segment};
use crate::core::models::user::Role;
use std::fmt::Write;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, notices: &[String], body: &str) -> String {
    let mut html = format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>medview | {}</title>\n</head>\n<body>\n<h1>{}</h1>\n",
        escape(title),
        escape(title)
    );
    if !notices.is_empty() {
        html.push_str("<ul class=\"notices\">\n");
        for notice in notices {
            let _ = writeln!(html, "<li>{}</li>", escape(notice));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

pub fn login_page(notice: Option<&str>) -> String {
    let notices: Vec<String> = notice.into_iter().map(str::to_string).collect();
    page(
        "Login",
        &notices,
        r#"<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
"#,
    )
}

pub fn index_page(username: &str, role: Role, notices: &[String]) -> String {
    let links = match role {
        Role::Student => "<li><a href=\"/upload\">Upload an image</a></li>\n<li><a href=\"/my_images\">My images</a></li>\n",
        Role::Doctor => "<li><a href=\"/view_images\">View images</a></li>\n",
    };
    let body = format!(
        "<p>Logged in as {} ({})</p>\n<ul>\n{}<li><a href=\"/logout\">Log out</a></li>\n</ul>\n",
        escape(username),
        role,
        links
    );
    page("Home", notices, &body)
}

pub fn upload_page(notice: Option<&str>) -> String {
    let notices: Vec<String> = notice.into_iter().map(str::to_string).collect();
    page(
        "Upload image",
        &notices,
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="file">
<button type="submit">Upload</button>
</form>
<p><a href="/">Back</a></p>
"#,
    )
}

pub fn my_images_page(images: &[ImageFeedback]) -> String {
    let mut body = String::from("<table>\n<tr><th>Image</th><th>Feedback</th></tr>\n");
    for image in images {
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/view_feedback/{segment}\">{name}</a></td><td class=\"feedback\">{}</td></tr>",
            escape(&image.feedback),
            segment = escape(&path_segment(&image.filename)),
            name = escape(&image.filename),
        );
    }
    body.push_str("</table>\n<p><a href=\"/\">Back</a></p>\n");
    page("My images", &[], &body)
}

pub fn view_images_page(images: &[ImageLink], notices: &[String]) -> String {
    let mut body = String::from("<ul class=\"images\">\n");
    for image in images {
        let _ = writeln!(
            body,
            "<li><img src=\"{url}\" alt=\"{name}\"> <a href=\"{url}\">{name}</a> <a href=\"/feedback/{segment}\">Give feedback</a></li>",
            url = escape(&image.url),
            segment = escape(&path_segment(&image.filename)),
            name = escape(&image.filename),
        );
    }
    body.push_str("</ul>\n<p><a href=\"/\">Back</a></p>\n");
    page("Uploaded images", notices, &body)
}

pub fn feedback_page(filename: &str) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/feedback/{segment}\">\n<textarea name=\"feedback\"></textarea>\n<button type=\"submit\">Submit feedback</button>\n</form>\n<p><a href=\"/view_images\">Back</a></p>\n",
        segment = escape(&path_segment(filename))
    );
    page(&format!("Feedback for {}", filename), &[], &body)
}

pub fn view_feedback_page(filename: &str, feedback: &str) -> String {
    let body = format!(
        "<p class=\"feedback\">{}</p>\n<p><a href=\"/my_images\">Back</a></p>\n",
        escape(feedback)
    );
    page(&format!("Feedback for {}", filename), &[], &body)
}
