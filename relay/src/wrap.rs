//! Page shell applied around rendered message bodies.

use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

/// Footer timestamps are always shown in UTC+8, whatever the server's zone.
const FOOTER_OFFSET: UtcOffset = offset!(+8);

const STYLE: &str = r#"    <style>
        body { font-family: sans-serif; background: #fff; color: #222; }
        .footer-time {
            color: #aaa;
            font-size: 0.92em;
            text-align: left;
            margin-top: 36px;
            padding-top: 10px;
        }
        hr {
            border: none;
            border-top: 1px solid #eee;
            margin-top: 32px;
            margin-bottom: 0;
        }
    </style>"#;

/// Wrap `body` in the page shell, stamped with the current time.
pub fn wrap_html(body: &str) -> String {
    wrap_html_at(body, OffsetDateTime::now_utc())
}

pub fn wrap_html_at(body: &str, at: OffsetDateTime) -> String {
    let footer = format_timestamp(at.to_offset(FOOTER_OFFSET));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
{STYLE}
</head>
<body>
    <div class="content">
        {body}
        <hr>
        <div class="footer-time">{footer}</div>
    </div>
</body>
</html>"#
    )
}

/// `YYYY-MM-DD HH:MM:SS` in the offset `at` already carries.
pub(crate) fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_default()
}

/// The server's local time, or UTC when the local offset is unavailable.
pub(crate) fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
