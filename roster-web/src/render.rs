//! Server-side HTML for the roster page
//!
//! Pure presentation over [`RosterView`]; ordering and visibility are
//! decided by the classifier before anything reaches this module.

use std::fmt::Write;
use std::sync::Arc;

use roster_common::image::{ImageParams, ImageUrlBuilder};
use roster_common::MemberRecord;

use crate::controller::{RosterView, YearOption};

/// Alt text for the placeholder portrait
pub const PLACEHOLDER_ALT: &str = "University of Washington construction hard-hat";

/// Keeps the role line's height when a member has no role
const EMPTY_ROLE: &str = "\u{200E}";

const BANNER_SHADE: &str = "linear-gradient(rgba(0, 0, 0, 0.4), rgba(0, 0, 0, 0.4))";

pub struct PageRenderer {
    images: Arc<dyn ImageUrlBuilder>,
    placeholder_image: String,
}

impl PageRenderer {
    pub fn new(images: Arc<dyn ImageUrlBuilder>, placeholder_image: impl Into<String>) -> Self {
        Self {
            images,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Full roster page for one year
    pub fn render_page(&self, options: &[YearOption], view: &RosterView<'_>) -> String {
        let banner = match self.images.url(&view.photo.image, ImageParams::BANNER) {
            Some(src) => format!("background-image: {}, url({})", BANNER_SHADE, src),
            None => String::new(),
        };

        let mut officers = String::new();
        for member in &view.classification.officers {
            officers.push_str(&self.render_member(member));
        }
        let mut members = String::new();
        for member in &view.classification.members {
            members.push_str(&self.render_member(member));
        }

        let body = format!(
            r#"<header id="title-container" style="{banner}">
    <h1>Members</h1>
    {selector}
</header>
<main>
    <h2 id="admintitle" style="display: {admin_display}">Officers</h2>
    <div id="admin" class="flex">{officers}</div>
    <h2 id="memberstitle" style="display: {members_display}">Members</h2>
    <div id="members" class="flex">{members}</div>
</main>"#,
            banner = html_escape(&banner),
            selector = render_selector(options, view.year),
            admin_display = display(view.classification.visibility.officers),
            officers = officers,
            members_display = display(view.classification.visibility.members),
            members = members,
        );

        document(&format!("Members {} - {}", view.year, view.year.saturating_add(1)), &body)
    }

    /// Page shown while the roster is not loaded
    pub fn render_unavailable(&self, last_error: Option<&str>) -> String {
        let detail = match last_error {
            Some(msg) => format!("<p class=\"error\">{}</p>", html_escape(msg)),
            None => "<p>The roster is still loading. Try again shortly.</p>".to_string(),
        };
        document(
            "Members",
            &format!(
                "<header id=\"title-container\"><h1>Members</h1></header>\n<main>{}</main>",
                detail
            ),
        )
    }

    /// One member card: portrait, name (linked when a profile exists), role
    pub fn render_member(&self, member: &MemberRecord) -> String {
        let (src, alt) = match member
            .image
            .as_ref()
            .and_then(|image| self.images.url(image, ImageParams::MEMBER_CARD))
        {
            Some(src) => (src, member.name.as_str()),
            None => (self.placeholder_image.clone(), PLACEHOLDER_ALT),
        };

        let name = match &member.linkedin {
            Some(link) => format!(
                "<a href=\"{}\">{}</a>",
                html_escape(link),
                html_escape(&member.name)
            ),
            None => html_escape(&member.name),
        };

        let role = member
            .role
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| EMPTY_ROLE.to_string());

        format!(
            "<div class=\"member flex\"><img class=\"member-photo flex\" loading=\"lazy\" src=\"{}\" alt=\"{}\"><h4>{}</h4><h5>{}</h5></div>",
            html_escape(&src),
            html_escape(alt),
            name,
            role
        )
    }
}

fn render_selector(options: &[YearOption], selected: i32) -> String {
    let mut html = String::from(
        "<form method=\"get\" action=\"/\"><select id=\"options\" name=\"year\" onchange=\"this.form.submit()\">",
    );
    for option in options {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            option.year,
            if option.year == selected { " selected" } else { "" },
            html_escape(&option.label)
        );
    }
    html.push_str("</select><noscript><button type=\"submit\">Show</button></noscript></form>");
    html
}

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
</head>
<body>
{}
</body>
</html>
"#,
        html_escape(title),
        body
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
