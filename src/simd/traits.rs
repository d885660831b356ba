use crate::MAX_VECTOR_BYTES;

/// A hardware vector register viewed as a plain bag of bits.
///
/// Bitwise operators have no lane structure, so one register type serves every
/// element width; only the mask broadcast needs to know the lane width, which
/// is why there is one `splat` per primitive width.
pub(crate) trait BitVector: Copy {
    /// Register width in bytes.
    const BYTES: usize;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn splat8(value: u8) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn splat16(value: u16) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn splat32(value: u32) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn splat64(value: u64) -> Self;

    /// Loads `BYTES` bytes from `ptr`, which need not be aligned.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `BYTES` bytes.
    unsafe fn load(ptr: *const u8) -> Self;

    /// Stores `BYTES` bytes at `ptr`, which need not be aligned.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `BYTES` bytes.
    unsafe fn store(self, ptr: *mut u8);

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn and(self, other: Self) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn or(self, other: Self) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn xor(self, other: Self) -> Self;

    /// # Safety
    ///
    /// The CPU must support this register's instruction set.
    unsafe fn not(self) -> Self;

    /// Loads the first `len` bytes at `ptr`, zero-filling the rest of the register.
    ///
    /// # Safety
    ///
    /// `len < BYTES` and `ptr` must be valid for reads of `len` bytes.
    #[inline(always)]
    unsafe fn load_partial(ptr: *const u8, len: usize) -> Self {
        debug_assert!(len < Self::BYTES, "partial load must be shorter than a register");

        let mut staging = [0u8; MAX_VECTOR_BYTES];
        core::ptr::copy_nonoverlapping(ptr, staging.as_mut_ptr(), len);
        Self::load(staging.as_ptr())
    }

    /// Stores only the first `len` bytes of the register at `ptr`.
    ///
    /// # Safety
    ///
    /// `len < BYTES` and `ptr` must be valid for writes of `len` bytes.
    #[inline(always)]
    unsafe fn store_partial(self, ptr: *mut u8, len: usize) {
        debug_assert!(len < Self::BYTES, "partial store must be shorter than a register");

        let mut staging = [0u8; MAX_VECTOR_BYTES];
        self.store(staging.as_mut_ptr());
        core::ptr::copy_nonoverlapping(staging.as_ptr(), ptr, len);
    }
}
