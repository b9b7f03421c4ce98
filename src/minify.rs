//! HTML minification, including the inline CSS and JavaScript of the shell.

use crate::error::{Error, Result};

/// Minify a complete HTML document.
pub fn html(input: &str) -> Result<String> {
    let cfg = minify_html::Cfg {
        minify_css: true,
        minify_js: true,
        ..Default::default()
    };

    let bytes = minify_html::minify(input.as_bytes(), &cfg);
    String::from_utf8(bytes).map_err(|e| Error::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_minifies_whitespace() {
        let input = r#"
            <html>
                <head>
                    <title>Test</title>
                </head>
                <body>
                    <div class="slide active">
                        <h2>Hello   world</h2>
                    </div>
                </body>
            </html>
        "#;
        let output = html(input).unwrap();
        assert!(!output.contains("    "));
        assert!(output.contains("<title>Test</title>"));
        assert!(output.contains("slide active"));
    }
}
