use std::io::{self, Write};

use crate::docker::DEFAULT_NO_PROXY;

/// Writes `export` lines suitable for `eval "$(clash-tools proxy)"`.
pub(crate) fn write_shell_exports(
    out: &mut impl Write,
    http_port: u32,
    socks_port: u32,
) -> io::Result<()> {
    let http = format!("http://127.0.0.1:{http_port}");
    let socks = format!("socks5://127.0.0.1:{socks_port}");

    for name in ["http_proxy", "https_proxy", "HTTP_PROXY", "HTTPS_PROXY"] {
        writeln!(out, "export {name}='{http}'")?;
    }
    for name in ["all_proxy", "ALL_PROXY"] {
        writeln!(out, "export {name}='{socks}'")?;
    }
    for name in ["no_proxy", "NO_PROXY"] {
        writeln!(out, "export {name}='{DEFAULT_NO_PROXY}'")?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_match_expected_block() {
        let mut out = Vec::new();

        write_shell_exports(&mut out, 7890, 7891).unwrap();

        let expected = "\
export http_proxy='http://127.0.0.1:7890'
export https_proxy='http://127.0.0.1:7890'
export HTTP_PROXY='http://127.0.0.1:7890'
export HTTPS_PROXY='http://127.0.0.1:7890'
export all_proxy='socks5://127.0.0.1:7891'
export ALL_PROXY='socks5://127.0.0.1:7891'
export no_proxy='localhost,127.0.0.1,::1'
export NO_PROXY='localhost,127.0.0.1,::1'
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn output_is_stable_across_calls() {
        let mut first = Vec::new();
        let mut second = Vec::new();

        write_shell_exports(&mut first, 1080, 1081).unwrap();
        write_shell_exports(&mut second, 1080, 1081).unwrap();

        assert_eq!(first, second);
    }
}
