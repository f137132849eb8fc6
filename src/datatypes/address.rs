// ABOUTME: Hierarchical device address used by device-addressed commands
// ABOUTME: Rendered on the wire as dot-joined decimals, cluster.member.subnet.device

use std::fmt;
use std::net::Ipv4Addr;

/// Full four-level address of a single device behind a router.
///
/// Cluster and member identify the router and are fixed for the life of a
/// client; subnet selects the DALI or DMX bus on that router and device the
/// address within the bus. All components are plain integers, so a rendered
/// address can never contain a wire-reserved character.
///
/// # Example
///
/// ```
/// use helvarnet::DeviceAddress;
///
/// let addr = DeviceAddress::new(1, 2, 1, 63);
/// assert_eq!(addr.to_string(), "1.2.1.63");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    pub cluster: u8,
    pub member: u8,
    pub subnet: u8,
    /// Device number within the subnet. DALI buses use 1-64; DMX subnets
    /// address up to 512 channels, hence the wider type.
    pub device: u16,
}

impl DeviceAddress {
    pub fn new(cluster: u8, member: u8, subnet: u8, device: u16) -> Self {
        DeviceAddress {
            cluster,
            member,
            subnet,
            device,
        }
    }

    /// Derives the router-identifying components from the router's IPv4
    /// address: the third octet is the cluster, the fourth the member.
    pub fn for_router(router: Ipv4Addr, subnet: u8, device: u16) -> Self {
        let octets = router.octets();
        DeviceAddress::new(octets[2], octets[3], subnet, device)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.cluster, self.member, self.subnet, self.device
        )
    }
}
