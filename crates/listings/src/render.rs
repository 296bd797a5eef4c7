use crate::client::ListingSummary;

/// Render one listing as a Telegram HTML message body.
pub fn render_listing(listing: &ListingSummary) -> String {
    let mut text = format!("<b>{}</b>\n", escape_html(&listing.title));
    if let Some(ref employer) = listing.employer {
        text.push_str(&format!("Employer: {}\n", escape_html(employer)));
    }
    text.push_str(&format!("Salary: {}\n", escape_html(&listing.salary)));
    text.push_str(&format!("<a href=\"{}\">Details</a>", listing.url));
    text
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_fields() {
        let listing = ListingSummary {
            title: "Driver".into(),
            url: "https://listings.example/1".into(),
            employer: Some("Acme".into()),
            salary: "from 100 USD".into(),
        };
        let html = render_listing(&listing);
        assert_eq!(
            html,
            "<b>Driver</b>\nEmployer: Acme\nSalary: from 100 USD\n\
             <a href=\"https://listings.example/1\">Details</a>"
        );
    }

    #[test]
    fn omits_missing_employer() {
        let listing = ListingSummary {
            title: "Driver".into(),
            url: "https://listings.example/1".into(),
            employer: None,
            salary: "not specified".into(),
        };
        assert!(!render_listing(&listing).contains("Employer:"));
    }

    #[test]
    fn escapes_markup_in_title() {
        let listing = ListingSummary {
            title: "C++ <senior> & co".into(),
            url: "https://listings.example/1".into(),
            employer: None,
            salary: "not specified".into(),
        };
        let html = render_listing(&listing);
        assert!(html.contains("&lt;senior&gt; &amp; co"));
    }
}
