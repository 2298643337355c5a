//! # Memory Bus
//!
//! The CPU reaches memory only through [`MemoryBus`]. The host decides what
//! sits behind each address: RAM, ROM, device registers or a logging wrapper.
//!
//! Bus operations are total. There is no bus error on a 6502: a read of an
//! unmapped address returns whatever the host chooses and a write to ROM is
//! simply dropped.
//!
//! [`FlatMemory`] is a 64KB RAM array; [`FnBus`] adapts a pair of host
//! closures.

/// Byte-wide access to the 16-bit address space.
///
/// `read` takes `&self`: executors read operands while holding other CPU
/// state, and read side effects (such as clearing a device status latch)
/// are the host's business, typically through interior mutability.
///
/// ```
/// use lib65xx::{FlatMemory, MemoryBus, RunOptions, CPU};
///
/// /// RAM with a write-only output port at $F001.
/// struct PortBus {
///     ram: FlatMemory,
///     output: Vec<u8>,
/// }
///
/// impl MemoryBus for PortBus {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0xF001 => 0xFF,
///             _ => self.ram.read(addr),
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         match addr {
///             0xF001 => self.output.push(value),
///             _ => self.ram.write(addr, value),
///         }
///     }
/// }
///
/// let mut ram = FlatMemory::new();
/// ram.set_reset_vector(0x0400);
/// ram.load(0x0400, &[0xA9, 0x48, 0x8D, 0x01, 0xF0, 0x02]); // LDA #'H'; STA $F001
///
/// let mut cpu = CPU::new(PortBus { ram, output: Vec::new() });
/// cpu.run(RunOptions::default()).unwrap();
///
/// assert_eq!(cpu.memory().output, b"H");
/// ```
pub trait MemoryBus {
    /// Reads the byte at `addr`. Must not panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes `value` to `addr`. Must not panic; read-only or unmapped
    /// addresses may drop the write.
    fn write(&mut self, addr: u16, value: u8);
}

/// 64KB of zero-initialized RAM covering the whole address space.
///
/// ```
/// use lib65xx::{FlatMemory, MemoryBus, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0xEA]); // NOP
/// assert_eq!(memory.read(0xFFFD), 0x80);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at $FFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            let addr = start.wrapping_add(offset as u16);
            self.data[addr as usize] = byte;
        }
    }

    /// Stores `addr` little-endian at $FFFC/$FFFD.
    pub fn set_reset_vector(&mut self, addr: u16) {
        self.load(0xFFFC, &addr.to_le_bytes());
    }

    /// Stores `addr` little-endian at $FFFA/$FFFB.
    pub fn set_nmi_vector(&mut self, addr: u16) {
        self.load(0xFFFA, &addr.to_le_bytes());
    }

    /// Stores `addr` little-endian at $FFFE/$FFFF.
    pub fn set_irq_vector(&mut self, addr: u16) {
        self.load(0xFFFE, &addr.to_le_bytes());
    }

    /// Borrows the whole address space.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

/// Memory bus backed by host-supplied read and write functions.
///
/// ```
/// use lib65xx::{FnBus, MemoryBus};
/// use std::sync::{Arc, Mutex};
///
/// let ram = Arc::new(Mutex::new(vec![0u8; 0x10000]));
/// let (r, w) = (Arc::clone(&ram), Arc::clone(&ram));
///
/// let mut bus = FnBus::new(
///     move |addr| r.lock().map(|m| m[addr as usize]).unwrap_or(0xFF),
///     move |addr, value| {
///         if let Ok(mut m) = w.lock() {
///             m[addr as usize] = value;
///         }
///     },
/// );
///
/// bus.write(0x0200, 0x55);
/// assert_eq!(bus.read(0x0200), 0x55);
/// ```
pub struct FnBus<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    read: R,
    write: W,
}

impl<R, W> FnBus<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> MemoryBus for FnBus<R, W>
where
    R: Fn(u16) -> u8,
    W: FnMut(u16, u8),
{
    fn read(&self, addr: u16) -> u8 {
        (self.read)(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (self.write)(addr, value)
    }
}
