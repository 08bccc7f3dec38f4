use std::fmt;

use bitflags::bitflags;

/// Kind of event emitted by the network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetEventKind {
    /// The PPP interface appeared.
    InterfaceUp,
    /// The PPP interface went away.
    InterfaceDown,
    /// The peer assigned an address.
    AddressAssigned,
    /// The network became reachable over the link.
    L4Connected,
    /// The network stopped being reachable.
    L4Disconnected,
}

impl NetEventKind {
    /// Mask bit matching this kind.
    pub fn mask(self) -> NetEventMask {
        match self {
            NetEventKind::InterfaceUp => NetEventMask::INTERFACE_UP,
            NetEventKind::InterfaceDown => NetEventMask::INTERFACE_DOWN,
            NetEventKind::AddressAssigned => NetEventMask::ADDRESS_ASSIGNED,
            NetEventKind::L4Connected => NetEventMask::L4_CONNECTED,
            NetEventKind::L4Disconnected => NetEventMask::L4_DISCONNECTED,
        }
    }
}

bitflags! {
    /// Set of event kinds a subscriber wants delivered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NetEventMask: u32 {
        /// Interface appeared.
        const INTERFACE_UP = 0x01;
        /// Interface went away.
        const INTERFACE_DOWN = 0x02;
        /// Address assigned.
        const ADDRESS_ASSIGNED = 0x04;
        /// Network reachable.
        const L4_CONNECTED = 0x08;
        /// Network unreachable.
        const L4_DISCONNECTED = 0x10;
    }
}

/// An event from the network stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetEvent {
    /// What happened.
    pub kind: NetEventKind,
    /// Interface it happened on.
    pub interface: String,
}

impl NetEvent {
    /// Event of `kind` on `interface`.
    pub fn new(kind: NetEventKind, interface: impl Into<String>) -> Self {
        Self {
            kind,
            interface: interface.into(),
        }
    }
}

/// Last observed network-layer reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    /// No connect or disconnect event seen yet.
    #[default]
    Unknown,
    /// Network reachable.
    Connected,
    /// Network unreachable.
    Disconnected,
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityStatus::Unknown => f.write_str("unknown"),
            ConnectivityStatus::Connected => f.write_str("connected"),
            ConnectivityStatus::Disconnected => f.write_str("disconnected"),
        }
    }
}
