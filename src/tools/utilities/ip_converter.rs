//! ip-converter tool - IPv4 dotted quads to integers and back

use std::net::Ipv4Addr;

use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// Classful classification with the special-purpose blocks called out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    ThisNetwork,
    A,
    B,
    C,
    D,
    E,
    Loopback,
    Private,
}

impl AddressClass {
    pub fn of(ip: Ipv4Addr) -> Self {
        if ip.is_loopback() {
            return AddressClass::Loopback;
        }
        if ip.is_private() {
            return AddressClass::Private;
        }
        match ip.octets()[0] {
            0 => AddressClass::ThisNetwork,
            1..=127 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddressClass::ThisNetwork => "Reserved (this network)",
            AddressClass::A => "Class A",
            AddressClass::B => "Class B",
            AddressClass::C => "Class C",
            AddressClass::D => "Class D (multicast)",
            AddressClass::E => "Class E (reserved)",
            AddressClass::Loopback => "Loopback",
            AddressClass::Private => "Private",
        }
    }
}

fn classful_range(first_octet: u8) -> &'static str {
    match first_octet {
        0 => "0.0.0.0/8",
        1..=126 => "1.0.0.0 - 126.255.255.255",
        127 => "127.0.0.0/8",
        128..=191 => "128.0.0.0 - 191.255.255.255",
        192..=223 => "192.0.0.0 - 223.255.255.255",
        224..=239 => "224.0.0.0 - 239.255.255.255",
        _ => "240.0.0.0 - 255.255.255.255",
    }
}

pub fn describe(ip: Ipv4Addr) -> String {
    let octets = ip.octets();
    let binary: Vec<String> = octets.iter().map(|o| format!("{:08b}", o)).collect();
    let hex: Vec<String> = octets.iter().map(|o| format!("{:02X}", o)).collect();
    [
        format!("Class: {}", AddressClass::of(ip).label()),
        format!("Range: {}", classful_range(octets[0])),
        format!("Binary: {}", binary.join(".")),
        format!("Hex: {}", hex.join(":")),
    ]
    .join("\n")
}

pub fn parse_ip(text: &str) -> Result<Ipv4Addr> {
    text.trim()
        .parse()
        .map_err(|_| OktoolsError::InvalidInput(format!("'{}' is not a valid IPv4 address", text.trim())))
}

pub fn parse_ip_int(text: &str) -> Result<Ipv4Addr> {
    let value: u64 = text
        .trim()
        .parse()
        .map_err(|_| OktoolsError::InvalidInput(format!("'{}' is not a valid integer", text.trim())))?;
    u32::try_from(value)
        .map(Ipv4Addr::from)
        .map_err(|_| OktoolsError::InvalidInput("integer out of range for IPv4".to_string()))
}

pub struct IpConverterTool;

impl Tool for IpConverterTool {
    fn id(&self) -> &'static str {
        "ip-converter"
    }

    fn name(&self) -> &'static str {
        "IP Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Convert between IP address and integer"
    }

    fn icon(&self) -> &'static str {
        "🌐"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["ip-to-int", "int-to-ip"], "default": "ip-to-int" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "an IP address or integer")?;
        let (result, ip) = match options.choice("mode", "ip-to-int", &["ip-to-int", "int-to-ip"])? {
            "int-to-ip" => {
                let ip = parse_ip_int(text)?;
                (ip.to_string(), ip)
            }
            _ => {
                let ip = parse_ip(text)?;
                (u32::from(ip).to_string(), ip)
            }
        };
        Ok(format!("{}\n\n{}", result, describe(ip)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_to_int() {
        let out = IpConverterTool.process("192.168.1.1", &ToolOptions::new()).unwrap();
        assert_eq!(
            out,
            "3232235777\n\n\
             Class: Private\n\
             Range: 192.0.0.0 - 223.255.255.255\n\
             Binary: 11000000.10101000.00000001.00000001\n\
             Hex: C0:A8:01:01"
        );
    }

    #[test]
    fn test_int_to_ip() {
        let opts = ToolOptions::new().with("mode", "int-to-ip");
        let out = IpConverterTool.process("134744072", &opts).unwrap();
        assert!(out.starts_with("8.8.8.8\n\nClass: Class A"));
    }

    #[test]
    fn test_classes() {
        let class = |s: &str| AddressClass::of(s.parse().unwrap());
        assert_eq!(class("127.0.0.1"), AddressClass::Loopback);
        assert_eq!(class("10.1.2.3"), AddressClass::Private);
        assert_eq!(class("172.16.0.1"), AddressClass::Private);
        assert_eq!(class("172.32.0.1"), AddressClass::B);
        assert_eq!(class("224.0.0.1"), AddressClass::D);
        assert_eq!(class("250.1.1.1"), AddressClass::E);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_ip("256.1.1.1").is_err());
        assert!(parse_ip("1.2.3").is_err());
        assert!(parse_ip_int("4294967296").is_err());
        assert!(parse_ip_int("-1").is_err());
        assert_eq!(parse_ip_int("4294967295").unwrap(), Ipv4Addr::BROADCAST);
    }
}
