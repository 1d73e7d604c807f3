//! user-agent-parser tool

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

static EDGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Edg/([\d.]+)").expect("valid regex"));
static OPERA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:OPR|Opera)/([\d.]+)").expect("valid regex"));
static CHROME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Chrome/([\d.]+)").expect("valid regex"));
static SAFARI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Version/([\d.]+)").expect("valid regex"));
static FIREFOX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Firefox/([\d.]+)").expect("valid regex"));
static WINDOWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Windows NT (\d+\.\d+)").expect("valid regex"));
static IOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:iPhone OS|CPU OS|iOS) (\d+(?:[_.]\d+)*)").expect("valid regex"));
static MACOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mac OS X (\d+(?:[_.]\d+)*)").expect("valid regex"));
static ANDROID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Android (\d+(?:\.\d+)*)").expect("valid regex"));
static WEBKIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AppleWebKit/([\d.]+)").expect("valid regex"));
static GECKO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Gecko/(\d+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Tablet => "Tablet",
            DeviceType::Desktop => "Desktop",
        };
        write!(f, "{}", s)
    }
}

/// Everything recognised in a User-Agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub browser: Option<String>,
    pub os: Option<String>,
    pub architecture: Option<&'static str>,
    pub engine: Option<String>,
    pub device: DeviceType,
}

fn capture(re: &Regex, ua: &str) -> Option<String> {
    re.captures(ua).map(|c| c[1].to_string())
}

fn windows_name(version: &str) -> String {
    match version {
        "10.0" => "Windows 10/11".to_string(),
        "6.3" => "Windows 8.1".to_string(),
        "6.2" => "Windows 8".to_string(),
        "6.1" => "Windows 7".to_string(),
        "6.0" => "Windows Vista".to_string(),
        "5.1" => "Windows XP".to_string(),
        other => format!("Windows {}", other),
    }
}

fn detect_browser(ua: &str) -> Option<String> {
    // Edge and Opera also advertise Chrome, and Chrome also advertises Safari
    if let Some(v) = capture(&EDGE_RE, ua) {
        return Some(format!("Microsoft Edge {}", v));
    }
    if let Some(v) = capture(&OPERA_RE, ua) {
        return Some(format!("Opera {}", v));
    }
    if let Some(v) = capture(&FIREFOX_RE, ua) {
        return Some(format!("Firefox {}", v));
    }
    if let Some(v) = capture(&CHROME_RE, ua) {
        return Some(format!("Google Chrome {}", v));
    }
    if ua.contains("Safari/") {
        return capture(&SAFARI_RE, ua).map(|v| format!("Safari {}", v));
    }
    None
}

fn detect_os(ua: &str) -> Option<String> {
    if let Some(v) = capture(&WINDOWS_RE, ua) {
        return Some(windows_name(&v));
    }
    // iOS strings also say "like Mac OS X"
    if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
        return capture(&IOS_RE, ua)
            .map(|v| format!("iOS {}", v.replace('_', ".")))
            .or_else(|| Some("iOS".to_string()));
    }
    if let Some(v) = capture(&MACOS_RE, ua) {
        return Some(format!("macOS {}", v.replace('_', ".")));
    }
    if let Some(v) = capture(&ANDROID_RE, ua) {
        return Some(format!("Android {}", v));
    }
    if ua.contains("Linux") {
        return Some("Linux".to_string());
    }
    None
}

fn detect_architecture(ua: &str) -> Option<&'static str> {
    if ua.contains("WOW64") || ua.contains("Win64") || ua.contains("x86_64") || ua.contains("x64") {
        Some("64-bit")
    } else if ua.contains("i686") || ua.contains("i386") {
        Some("32-bit")
    } else if ua.contains("arm") || ua.contains("aarch64") {
        Some("ARM")
    } else {
        None
    }
}

fn detect_engine(ua: &str) -> Option<String> {
    capture(&WEBKIT_RE, ua)
        .map(|v| format!("WebKit {}", v))
        .or_else(|| capture(&GECKO_RE, ua).map(|v| format!("Gecko {}", v)))
}

fn detect_device(ua: &str) -> DeviceType {
    if ua.contains("iPad") || ua.contains("Tablet") {
        DeviceType::Tablet
    } else if ua.contains("Mobile") || ua.contains("Android") || ua.contains("iPhone") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

pub fn parse_user_agent(ua: &str) -> Result<UserAgentInfo> {
    let info = UserAgentInfo {
        browser: detect_browser(ua),
        os: detect_os(ua),
        architecture: detect_architecture(ua),
        engine: detect_engine(ua),
        device: detect_device(ua),
    };
    if info.browser.is_none() && info.os.is_none() && info.engine.is_none() {
        return Err(OktoolsError::Parse("no known browser, OS or engine found".to_string()));
    }
    Ok(info)
}

impl fmt::Display for UserAgentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(browser) = &self.browser {
            writeln!(f, "Browser: {}", browser)?;
        }
        if let Some(os) = &self.os {
            writeln!(f, "OS: {}", os)?;
        }
        if let Some(arch) = self.architecture {
            writeln!(f, "Architecture: {}", arch)?;
        }
        if let Some(engine) = &self.engine {
            writeln!(f, "Engine: {}", engine)?;
        }
        write!(f, "Device: {}", self.device)
    }
}

pub struct UserAgentParserTool;

impl Tool for UserAgentParserTool {
    fn id(&self) -> &'static str {
        "user-agent-parser"
    }

    fn name(&self) -> &'static str {
        "User-Agent Parser"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Parse browser User-Agent strings"
    }

    fn icon(&self) -> &'static str {
        "🌐"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let ua = require_input(input, "a User-Agent string")?;
        Ok(parse_user_agent(ua)?.to_string())
    }
}
