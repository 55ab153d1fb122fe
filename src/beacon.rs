//! Hello beacon carried in BLE advertising data.
//!
//! Layout (one manufacturer-specific AD structure):
//!
//! ```text
//! [len][0xFF][0xFF 0xFF][b'M' b'B'][kind][addr lo][addr hi][name...]
//! ```
//!
//! The company identifier is the reserved test value 0xFFFF.

use crate::config::{Millis, PEER_NAME_LEN};
use crate::text::truncated;
use heapless::{String, Vec};

const AD_TYPE_FLAGS: u8 = 0x01;
const AD_TYPE_MANUFACTURER: u8 = 0xFF;
const COMPANY_ID: [u8; 2] = [0xFF, 0xFF];
const MAGIC: [u8; 2] = *b"MB";
const KIND_HELLO: u8 = 0x01;

/// Bytes before the name inside the manufacturer AD payload.
const HEADER_LEN: usize = COMPANY_ID.len() + MAGIC.len() + 1 + 2;

/// Largest advertising payload the beacon produces.
pub const BEACON_MAX: usize = 3 + 2 + HEADER_LEN + PEER_NAME_LEN;

/// Write a hello beacon for `address`/`name` into `buf`.
///
/// The name is cut to the peer name length on a char boundary. Returns the
/// number of bytes written, or `0` if `buf` is too small.
pub fn encode_hello(address: u16, name: &str, buf: &mut [u8]) -> usize {
    let mut end = name.len().min(PEER_NAME_LEN);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    let name = &name.as_bytes()[..end];

    let total = 3 + 2 + HEADER_LEN + name.len();
    if buf.len() < total {
        return 0;
    }

    // LE General Discoverable, BR/EDR not supported.
    buf[..3].copy_from_slice(&[0x02, AD_TYPE_FLAGS, 0x06]);
    buf[3] = (1 + HEADER_LEN + name.len()) as u8;
    buf[4] = AD_TYPE_MANUFACTURER;
    buf[5..7].copy_from_slice(&COMPANY_ID);
    buf[7..9].copy_from_slice(&MAGIC);
    buf[9] = KIND_HELLO;
    buf[10..12].copy_from_slice(&address.to_le_bytes());
    buf[12..total].copy_from_slice(name);
    total
}

/// Find a hello beacon in raw advertising data.
pub fn parse_hello(data: &[u8]) -> Option<(u16, String<PEER_NAME_LEN>)> {
    let mut i = 0;
    while i < data.len() {
        let len = data[i] as usize;
        if len == 0 || i + len >= data.len() {
            break;
        }
        let ad_type = data[i + 1];
        let payload = &data[i + 2..i + 1 + len];
        if ad_type == AD_TYPE_MANUFACTURER
            && payload.len() >= HEADER_LEN
            && payload[..2] == COMPANY_ID
            && payload[2..4] == MAGIC
            && payload[4] == KIND_HELLO
        {
            let address = u16::from_le_bytes([payload[5], payload[6]]);
            let raw = &payload[HEADER_LEN..];
            // Keep the longest valid UTF-8 prefix of a damaged name.
            let name = match core::str::from_utf8(raw) {
                Ok(name) => name,
                Err(e) => core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or_default(),
            };
            return Some((address, truncated(name.chars())));
        }
        i += len + 1;
    }
    None
}

/// Drops the repeated copies of an announce burst.
///
/// Tracks up to `N` senders. A sender stays known while its copies keep
/// arriving less than `window` apart; when the list is full the sender heard
/// least recently is forgotten.
pub struct RepeatFilter<const N: usize> {
    seen: Vec<(u16, Millis), N>,
    window: Millis,
}

impl<const N: usize> RepeatFilter<N> {
    pub const fn new(window: Millis) -> Self {
        Self {
            seen: Vec::new(),
            window,
        }
    }

    /// Whether a hello from `address` heard at `now` starts a new burst.
    pub fn is_new(&mut self, address: u16, now: Millis) -> bool {
        let window = self.window;
        self.seen.retain(|&(_, heard)| now.saturating_sub(heard) < window);

        if let Some(entry) = self.seen.iter_mut().find(|(seen, _)| *seen == address) {
            entry.1 = now;
            return false;
        }

        if self.seen.is_full() {
            if let Some(oldest) = self
                .seen
                .iter()
                .enumerate()
                .min_by_key(|&(_, &(_, heard))| heard)
                .map(|(i, _)| i)
            {
                self.seen.swap_remove(oldest);
            }
        }
        let _ = self.seen.push((address, now));
        true
    }
}
