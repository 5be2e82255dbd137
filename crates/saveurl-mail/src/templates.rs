//! Message templates.
//!
//! Every template renders an HTML body and a plain-text alternative.
//! Interpolated user input is HTML-escaped.

/// A rendered subject and body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    pub html: String,
    pub text: String,
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{title}</title></head>
<body style="margin:0;padding:0;font-family:Arial,sans-serif;background-color:#f9fafb;">
  <div style="max-width:600px;margin:0 auto;padding:20px;">
    <div style="background-color:#ffffff;border-radius:8px;padding:40px;">
      <h1 style="color:#7c3aed;font-size:24px;text-align:center;">{title}</h1>
      {content}
      <p style="color:#9ca3af;font-size:12px;text-align:center;border-top:1px solid #e5e7eb;padding-top:20px;">
        This is an automated message, please do not reply.
      </p>
    </div>
  </div>
</body>
</html>"#
    )
}

fn code_block(code: &str) -> String {
    format!(
        r#"<div style="background-color:#f3f4f6;border-radius:8px;padding:30px;text-align:center;font-size:36px;font-weight:bold;letter-spacing:8px;color:#7c3aed;">{}</div>"#,
        escape_html(code)
    )
}

fn button(url: &str, label: &str) -> String {
    format!(
        r#"<p style="text-align:center;margin:30px 0;"><a href="{}" style="background-color:#7c3aed;color:#ffffff;padding:14px 32px;text-decoration:none;border-radius:8px;">{label}</a></p>"#,
        escape_html(url)
    )
}

/// Email verification code sent at signup.
pub fn verification(code: &str, ttl_minutes: i64) -> Rendered {
    let title = "Verify Your Email";
    let content = format!(
        "<p>Thank you for signing up! Please use the verification code below to complete your registration:</p>\
         {}\
         <p style=\"color:#6b7280;font-size:14px;\">This code will expire in {ttl_minutes} minutes.</p>\
         <p style=\"color:#6b7280;font-size:14px;\">If you didn't request this verification, please ignore this email.</p>",
        code_block(code)
    );
    Rendered {
        subject: title.to_string(),
        html: layout(title, &content),
        text: format!(
            "Thank you for signing up!\n\nYour verification code is: {code}\n\n\
             This code will expire in {ttl_minutes} minutes.\n\
             If you didn't request this verification, please ignore this email."
        ),
    }
}

/// Sent once the email address has been verified.
pub fn welcome(name: &str, login_url: &str) -> Rendered {
    let title = "Welcome to SaveUrURL.ME!";
    let content = format!(
        "<p>Hi {},</p>\
         <p>Thank you for verifying your email! Your account is now active.</p>\
         {}",
        escape_html(name),
        button(login_url, "Get Started")
    );
    Rendered {
        subject: title.to_string(),
        html: layout(title, &content),
        text: format!(
            "Hi {name},\n\nThank you for verifying your email! Your account is now active.\n\n\
             Sign in at {login_url}"
        ),
    }
}

/// Password reset code sent by forgot-password.
pub fn password_reset(name: &str, code: &str, ttl_minutes: i64) -> Rendered {
    let title = "Reset Your Password";
    let content = format!(
        "<p>Hi {},</p>\
         <p>We received a request to reset your password. Use the code below to proceed:</p>\
         {}\
         <p style=\"color:#6b7280;font-size:14px;\">This code will expire in {ttl_minutes} minutes.</p>\
         <p style=\"color:#ef4444;font-size:14px;font-weight:600;\">If you didn't request a password reset, please ignore this email.</p>",
        escape_html(name),
        code_block(code)
    );
    Rendered {
        subject: title.to_string(),
        html: layout(title, &content),
        text: format!(
            "Hi {name},\n\nYour password reset code is: {code}\n\n\
             This code will expire in {ttl_minutes} minutes.\n\
             If you didn't request a password reset, please ignore this email."
        ),
    }
}

/// Confirmation after a successful password reset.
pub fn reset_success(login_url: &str) -> Rendered {
    let title = "Password Reset Successful";
    let content = format!(
        "<p>Your password has been successfully reset. You can now sign in with your new password.</p>\
         {}\
         <p style=\"color:#ef4444;font-size:14px;\"><strong>Security Alert:</strong> If you didn't reset your password, please contact support immediately.</p>",
        button(login_url, "Sign In")
    );
    Rendered {
        subject: title.to_string(),
        html: layout(title, &content),
        text: format!(
            "Your password has been successfully reset.\n\nSign in at {login_url}\n\n\
             If you didn't reset your password, please contact support immediately."
        ),
    }
}
