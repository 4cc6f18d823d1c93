//! HTML rendering for the generator page.
//!
//! Everything that came from the user or a model goes through [`escape_html`].

use std::fmt::Write;

use super::form::GENERATE_ACTION;
use super::session::{GenerationSession, Outcome};
use crate::generator::GeneratedPost;
use crate::ProviderType;

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", sans-serif; margin: 0; color: #31333f; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 280px; padding: 24px; background-color: #f0f2f6; }
.main { flex: 1; padding: 24px 48px; }
.columns { display: flex; gap: 48px; }
.columns > section { flex: 1; min-width: 0; }
label { display: block; margin: 12px 0 4px; font-size: 14px; }
input[type=text], input[type=password], input[type=date], textarea {
    width: 100%; box-sizing: border-box; padding: 8px; border: none;
    border-radius: 5px; background-color: #f0f2f6; font: inherit;
}
.sidebar input[type=password] { background-color: white; }
.output-container {
    background-color: #f8f9fa; padding: 20px; border-radius: 10px;
    border: 1px solid #dee2e6; margin-top: 5px; white-space: pre-wrap;
}
.output-container.error { border-color: #f5c2c7; color: #842029; }
.generate-button {
    background-color: #4CAF50; color: white; padding: 10px 20px;
    border-radius: 5px; border: none; cursor: pointer; width: 100%; margin-top: 16px;
}
.copy-wrapper { position: relative; margin-bottom: 15px; }
.copy-button {
    background-color: white; border: 1px solid #ccc; padding: 8px 15px;
    border-radius: 5px; cursor: pointer; display: flex; align-items: center;
    gap: 5px; font-size: 14px;
}
.copy-source { position: absolute; top: -9999px; left: -9999px; }
.info { background-color: #e8f4fd; padding: 12px 16px; border-radius: 5px; }
.warning { background-color: #fff8e1; padding: 12px 16px; border-radius: 5px; }
.error-banner { background-color: #fdecea; padding: 12px 16px; border-radius: 5px; }
"#;

const SCRIPT: &str = r#"
function fallbackCopy(source) {
    source.select();
    document.execCommand("copy");
}
function copyPost(id, button) {
    if (button.dataset.copied === "true") return;
    var source = document.getElementById("textToCopy_" + id);
    var original = button.innerHTML;
    var confirm = function () {
        button.dataset.copied = "true";
        button.innerHTML = "<span>✓ Copied!</span>";
        setTimeout(function () {
            button.innerHTML = original;
            button.dataset.copied = "false";
        }, 2000);
    };
    if (navigator.clipboard && window.isSecureContext) {
        navigator.clipboard.writeText(source.value).then(confirm, function () {
            fallbackCopy(source);
            confirm();
        });
    } else {
        fallbackCopy(source);
        confirm();
    }
}
"#;

const EXAMPLE_DESCRIPTION: &str = "Join us for an exciting day of technology insights, networking, \
and learning from industry experts. Featured topics include AI, Cloud Computing, and Digital Transformation.";

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the full page for a session.
pub fn render_page(session: &GenerationSession) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Social Media Post Generator</title>\n");
    let _ = write!(html, "<style>{STYLE}</style>\n<script>{SCRIPT}</script>\n");
    html.push_str("</head>\n<body>\n<form method=\"post\" action=\"/\" class=\"layout\">\n");

    render_sidebar(&mut html, session);

    html.push_str("<main class=\"main\">\n");
    html.push_str("<h1>📱 Social Media Post Generator (AI-Powered)</h1>\n");
    html.push_str("<p>Generate AI-powered platform-specific posts for your events</p>\n<hr>\n");

    if let Outcome::InitializationFailed(message) = &session.outcome {
        let _ = writeln!(html, "<div class=\"error-banner\">{}</div>", escape_html(message));
    }

    html.push_str("<div class=\"columns\">\n");
    render_inputs(&mut html, session);
    html.push_str("<section class=\"results\">\n");
    render_outcome(&mut html, session);
    html.push_str("</section>\n</div>\n</main>\n</form>\n</body>\n</html>\n");

    html
}

fn render_sidebar(html: &mut String, session: &GenerationSession) {
    let selected = session.form.provider;

    html.push_str("<aside class=\"sidebar\">\n<h2>API Configuration</h2>\n");
    html.push_str("<fieldset>\n<legend>Select AI Service</legend>\n");
    for provider in ProviderType::ALL {
        let checked = if provider == selected { " checked" } else { "" };
        let _ = writeln!(
            html,
            "<label><input type=\"radio\" name=\"provider\" value=\"{}\"{checked} \
             onchange=\"this.form.requestSubmit()\"> {}</label>",
            provider.form_value(),
            provider.display_name()
        );
    }
    html.push_str("</fieldset>\n");

    let _ = writeln!(
        html,
        "<label for=\"api_key\">Enter {}</label>\n\
         <input type=\"password\" id=\"api_key\" name=\"api_key\" value=\"{}\" autocomplete=\"off\">\n\
         <p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Get {}</a></p>",
        selected.key_label(),
        escape_html(&session.form.api_key),
        selected.key_url(),
        selected.key_label()
    );

    if session.outcome == Outcome::MissingCredential {
        let _ = writeln!(
            html,
            "<div class=\"warning\">Please enter your {selected} API key to continue</div>"
        );
    }

    html.push_str("</aside>\n");
}

fn render_inputs(html: &mut String, session: &GenerationSession) {
    let form = &session.form;

    html.push_str("<section class=\"inputs\">\n");
    let _ = writeln!(
        html,
        "<label for=\"event_name\">Event Name</label>\n\
         <input type=\"text\" id=\"event_name\" name=\"event_name\" placeholder=\"Enter event name\" value=\"{}\">",
        escape_html(&form.event_name)
    );
    let _ = writeln!(
        html,
        "<label for=\"event_date\">Event Date</label>\n\
         <input type=\"date\" id=\"event_date\" name=\"event_date\" min=\"{}\" value=\"{}\">",
        session.today.format("%Y-%m-%d"),
        escape_html(&form.event_date)
    );
    let _ = writeln!(
        html,
        "<label for=\"venue\">Venue</label>\n\
         <input type=\"text\" id=\"venue\" name=\"venue\" placeholder=\"Enter event venue\" value=\"{}\">",
        escape_html(&form.venue)
    );
    let _ = writeln!(
        html,
        "<label for=\"description\">Event Description</label>\n\
         <textarea id=\"description\" name=\"description\" rows=\"7\" \
         placeholder=\"Enter a detailed description of your event\">\n{}</textarea>",
        escape_html(&form.description)
    );
    let _ = writeln!(
        html,
        "<button type=\"submit\" name=\"action\" value=\"{GENERATE_ACTION}\" class=\"generate-button\">Generate Posts</button>"
    );
    html.push_str("</section>\n");
}

fn render_outcome(html: &mut String, session: &GenerationSession) {
    match &session.outcome {
        Outcome::MissingCredential => {
            let _ = writeln!(
                html,
                "<div class=\"info\">👈 Enter your {} API key in the sidebar to get started</div>",
                session.form.provider
            );
        }
        Outcome::InitializationFailed(_) => {}
        Outcome::Idle => {
            html.push_str(
                "<div class=\"info\">👈 Fill in all the event details and click 'Generate Posts'</div>\n",
            );
            render_example(html);
        }
        Outcome::Incomplete(reason) => {
            let _ = writeln!(
                html,
                "<div class=\"warning\">{}</div>",
                escape_html(&reason.to_string())
            );
            render_example(html);
        }
        Outcome::Generated(posts) => {
            for post in posts {
                render_post(html, post);
            }
        }
    }
}

fn render_post(html: &mut String, post: &GeneratedPost) {
    let slug = post.platform.slug();
    let text = escape_html(&post.text);
    let panel_class = if post.failed {
        "output-container error"
    } else {
        "output-container"
    };

    // The newline after <textarea> is swallowed by the HTML parser, so a
    // leading newline in the text itself survives.
    let _ = writeln!(
        html,
        "<h3>{} Post</h3>\n\
         <div class=\"copy-wrapper\">\n\
         <button type=\"button\" class=\"copy-button\" onclick=\"copyPost('{slug}', this)\">\
         <span style=\"font-size: 16px;\">📋</span><span>Copy</span></button>\n\
         <textarea id=\"textToCopy_{slug}\" class=\"copy-source\" readonly tabindex=\"-1\" aria-hidden=\"true\">\n{text}</textarea>\n\
         </div>\n\
         <div id=\"post_{slug}\" class=\"{panel_class}\">{text}</div>",
        post.platform
    );
}

fn render_example(html: &mut String) {
    let _ = writeln!(
        html,
        "<h3>Example Input</h3>\n\
         <p><strong>Event Name:</strong> Tech Conference 2025</p>\n\
         <p><strong>Date:</strong> January 15, 2025</p>\n\
         <p><strong>Venue:</strong> Virtual Event</p>\n\
         <p><strong>Description:</strong> {EXAMPLE_DESCRIPTION}</p>"
    );
}
