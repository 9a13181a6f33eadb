// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: filehash
// File: realip.rs
// Author: filehash maintainers

//! Discovery of the host's public IPv4 / IPv6 address.

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv6Addr};
use std::time::Duration;

/// Service answering a plain GET with the caller's IPv4 address.
pub const IPV4_SERVICE: &str = "http://ifconfig.me";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressFamily {
	V4,
	V6,
}

impl AddressFamily {
	/// Maps `4` / `6` to a family.
	pub fn from_number(number: u8) -> Option<Self> {
		match number {
			4 => Some(Self::V4),
			6 => Some(Self::V6),
			_ => None,
		}
	}
}

#[derive(Debug)]
pub enum RealIpError {
	Request(reqwest::Error),
	Body(reqwest::Error),
	Io(io::Error),
	NotFound,
}

impl fmt::Display for RealIpError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Request(err) => write!(f, "send request error: {}", err),
			Self::Body(err) => write!(f, "read body error: {}", err),
			Self::Io(err) => write!(f, "interface lookup error: {}", err),
			Self::NotFound => write!(f, "ip not found"),
		}
	}
}

impl std::error::Error for RealIpError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Request(err) | Self::Body(err) => Some(err),
			Self::Io(err) => Some(err),
			Self::NotFound => None,
		}
	}
}

/// [`real_ip_with_timeout`] with [`DEFAULT_TIMEOUT`].
pub fn real_ip(family: AddressFamily) -> Result<Vec<String>, RealIpError> {
	real_ip_with_timeout(family, DEFAULT_TIMEOUT)
}

/// Public addresses of this host for `family`.
///
/// IPv4 asks [`IPV4_SERVICE`]; IPv6 walks the local interface table and
/// returns every globally routable address on it.
pub fn real_ip_with_timeout(
	family: AddressFamily,
	timeout: Duration,
) -> Result<Vec<String>, RealIpError> {
	match family {
		AddressFamily::V4 => ipv4_from_service(IPV4_SERVICE, timeout),
		AddressFamily::V6 => ipv6_from_interfaces(),
	}
}

fn ipv4_from_service(
	url: &str,
	timeout: Duration,
) -> Result<Vec<String>, RealIpError> {
	log::debug!("querying {} for public ipv4", url);
	let client = reqwest::blocking::Client::builder()
		.timeout(timeout)
		.build()
		.map_err(RealIpError::Request)?;
	let body = client
		.get(url)
		.send()
		.and_then(|resp| resp.error_for_status())
		.map_err(RealIpError::Request)?
		.text()
		.map_err(RealIpError::Body)?;
	let addr = body.trim();
	if addr.is_empty() {
		return Err(RealIpError::NotFound);
	}
	Ok(vec![addr.to_string()])
}

fn ipv6_from_interfaces() -> Result<Vec<String>, RealIpError> {
	let interfaces = if_addrs::get_if_addrs().map_err(RealIpError::Io)?;
	for iface in &interfaces {
		log::trace!("interface {} has {}", iface.name, iface.ip());
	}
	global_ipv6(interfaces.iter().map(|iface| iface.ip()))
}

fn global_ipv6<I>(addrs: I) -> Result<Vec<String>, RealIpError>
where
	I: IntoIterator<Item = IpAddr>,
{
	let ips: Vec<String> = addrs
		.into_iter()
		.filter_map(|addr| match addr {
			IpAddr::V6(ip) if is_global_unicast(&ip) => Some(ip.to_string()),
			_ => None,
		})
		.collect();
	if ips.is_empty() {
		return Err(RealIpError::NotFound);
	}
	Ok(ips)
}

/// Unicast, not loopback, not unspecified and not link-local.
pub fn is_global_unicast(ip: &Ipv6Addr) -> bool {
	let link_local = (ip.segments()[0] & 0xffc0) == 0xfe80;
	!(ip.is_unspecified()
		|| ip.is_loopback()
		|| ip.is_multicast()
		|| link_local
		|| ip.to_ipv4_mapped().is_some())
}
