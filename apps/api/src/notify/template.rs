//! HTML email body shared by all three campaigns.

/// Placeholders are replaced verbatim; the message block keeps the sender's
/// line breaks via `white-space: pre-line`.
const CAMPAIGN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{header_line}</title>
    <style>
      .container { width: 100%; padding: 20px; background-color: #f4f4f4; }
      .email { max-width: 600px; margin: 0 auto; background-color: #fff; border-radius: 8px; overflow: hidden; }
      .email-header { background: #007bff; color: #fff; padding: 30px 20px; text-align: center; }
      .email-body { padding: 30px 20px; line-height: 1.6; color: #333; }
      .message-content { background-color: #f8f9fa; padding: 20px; border-radius: 6px; margin: 20px 0; white-space: pre-line; }
      .cta-button { display: inline-block; background-color: #007bff; color: #fff !important; padding: 15px 30px; text-decoration: none; border-radius: 5px; font-weight: bold; }
      .cta-section { text-align: center; margin: 30px 0; }
      .job-details { border-top: 1px solid #e0e0e0; padding-top: 20px; margin-top: 30px; }
      .email-footer { background-color: #f8f9fa; color: #666; padding: 20px; text-align: center; font-size: 12px; }
    </style>
  </head>
  <body>
    <div class="container">
      <div class="email">
        <div class="email-header">
          <h1>{company_name}</h1>
          <p>{header_line}</p>
        </div>
        <div class="email-body">
          <div class="message-content">{message}</div>
          {cta_section}
          <div class="job-details">
            <p><strong>Position:</strong> {job_title}</p>
            <p><strong>Company:</strong> {company_name}</p>
            <p><strong>Contact:</strong> {hr_name}</p>
          </div>
        </div>
        <div class="email-footer">
          <p>This is an automated message from the ATS system. Please do not reply to this email.</p>
        </div>
      </div>
    </div>
  </body>
</html>
"#;

const CTA_SECTION: &str = r#"<div class="cta-section"><a href="{link}" class="cta-button">{button_text}</a></div>"#;

pub struct TemplateOptions<'a> {
    pub company_name: &'a str,
    pub job_title: &'a str,
    pub hr_name: &'a str,
    pub header_line: &'a str,
    pub message: &'a str,
    /// Link plus button label; omitted entirely for campaigns without one.
    pub cta: Option<(&'a str, &'a str)>,
}

pub fn render(options: &TemplateOptions<'_>) -> String {
    let cta_section = match options.cta {
        Some((link, button_text)) => CTA_SECTION
            .replace("{link}", link)
            .replace("{button_text}", button_text),
        None => String::new(),
    };
    CAMPAIGN_TEMPLATE
        .replace("{cta_section}", &cta_section)
        .replace("{company_name}", options.company_name)
        .replace("{job_title}", options.job_title)
        .replace("{hr_name}", options.hr_name)
        .replace("{header_line}", options.header_line)
        .replace("{message}", options.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_placeholders_substituted() {
        let html = render(&TemplateOptions {
            company_name: "Acme",
            job_title: "Platform Engineer",
            hr_name: "Dana",
            header_line: "Assessment Test Invitation",
            message: "Please take the assessment test.",
            cta: Some(("https://tests.acme.test/abc", "Take the Test")),
        });
        assert!(html.contains("Acme"));
        assert!(html.contains("Platform Engineer"));
        assert!(html.contains("https://tests.acme.test/abc"));
        for placeholder in [
            "{company_name}",
            "{job_title}",
            "{hr_name}",
            "{header_line}",
            "{message}",
            "{cta_section}",
            "{link}",
            "{button_text}",
        ] {
            assert!(!html.contains(placeholder), "unreplaced {placeholder}");
        }
    }

    #[test]
    fn test_cta_omitted_when_absent() {
        let html = render(&TemplateOptions {
            company_name: "Acme",
            job_title: "Platform Engineer",
            hr_name: "Dana",
            header_line: "Welcome Aboard",
            message: "See you Monday.",
            cta: None,
        });
        assert!(!html.contains("cta-button"));
    }
}
