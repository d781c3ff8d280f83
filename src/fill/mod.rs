pub(crate) mod scanline;
