//! Page layout and shared markup.

use maud::{DOCTYPE, Markup, PreEscaped, html};

// Link styles
pub const LINK_STYLE: &str = "link";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "button";

// Form styles
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";
pub const FORM_ERROR_STYLE: &str = "form-error";

// List styles
pub const LIST_ITEM_STYLE: &str = "list-item";
pub const LIST_ACTIONS_STYLE: &str = "actions";

const PAGE_STYLE: &str = r#"
    * {
        box-sizing: border-box;
    }

    body {
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        max-width: 800px;
        margin: 40px auto;
        padding: 30px;
        border-radius: 12px;
        background: #f4f6f8;
        color: #2d3436;
        box-shadow: 0 10px 25px rgba(0, 0, 0, 0.1);
    }

    h2 {
        color: #0984e3;
        margin-bottom: 20px;
    }

    .link {
        display: inline-block;
        margin-right: 10px;
        padding: 8px 14px;
        border-radius: 6px;
        background-color: #dfe6e9;
        color: #2d3436;
        text-decoration: none;
    }

    .link:hover {
        background-color: #b2bec3;
    }

    ul {
        padding-left: 0;
        list-style: none;
    }

    .list-item {
        display: flex;
        justify-content: space-between;
        align-items: center;
        margin-bottom: 10px;
        padding: 12px 16px;
        border-radius: 6px;
        background: #ffffff;
    }

    .actions .link {
        margin-left: 8px;
    }

    form {
        margin-bottom: 30px;
        padding: 20px;
        border-radius: 10px;
        background: #ffffff;
    }

    .form-label {
        display: block;
        font-size: 0.9rem;
    }

    .form-input {
        width: 100%;
        margin: 10px 0;
        padding: 10px;
        border: 1px solid #cccccc;
        border-radius: 6px;
    }

    .form-error {
        color: #d63031;
    }

    .button {
        padding: 10px 18px;
        border: none;
        border-radius: 6px;
        background-color: #0984e3;
        color: white;
        cursor: pointer;
    }

    .button:hover {
        background-color: #74b9ff;
    }
"#;

/// Wrap `content` in a complete HTML document titled `title`.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - User Manager" }
                style { (PreEscaped(PAGE_STYLE)) }
            }

            body
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section
        {
            h2 { (header) }
            p { (description) }
            p class=(FORM_ERROR_STYLE) { (fix) }
            (link("/", "Back to Homepage"))
        }
    );

    base(title, &content)
}

/// A link styled as a button.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}
