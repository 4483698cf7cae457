//! Trait vocabulary for symmetric stream ciphers, plus the glue that adapts
//! a synchronous cipher to the buffered `Encryptor`/`Decryptor` interface.
#![no_std]
extern crate crypto_buffers;

use crypto_buffers::{BufferResult, RefReadBuffer, RefWriteBuffer, ReadBuffer,
                     WriteBuffer};
use core::cmp;

#[derive(Debug, Clone, Copy)]
pub enum SymmetricCipherError {
    InvalidLength,
}

pub trait Encryptor {
    fn encrypt(&mut self, input: &mut RefReadBuffer,
               output: &mut RefWriteBuffer, eof: bool)
               -> Result<BufferResult, SymmetricCipherError>;
}

pub trait Decryptor {
    fn decrypt(&mut self, input: &mut RefReadBuffer,
               output: &mut RefWriteBuffer, eof: bool)
               -> Result<BufferResult, SymmetricCipherError>;
}

/// A keystream cipher that transforms input to output of the same length in
/// a single pass. Encryption and decryption are the same operation.
pub trait SynchronousStreamCipher {
    fn process(&mut self, input: &[u8], output: &mut [u8]);
}

/// `symm_enc_or_dec()` implements the necessary functionality to turn a
/// `SynchronousStreamCipher` into an Encryptor or Decryptor
pub fn symm_enc_or_dec<S: SynchronousStreamCipher,
                       R: ReadBuffer,
                       W: WriteBuffer>
    (c: &mut S, input: &mut R, output: &mut W)
     -> Result<BufferResult, SymmetricCipherError> {
    let count = cmp::min(input.remaining(), output.remaining());
    c.process(input.take_next(count), output.take_next(count));
    if input.is_empty() {
        Ok(BufferResult::BufferUnderflow)
    } else {
        Ok(BufferResult::BufferOverflow)
    }
}
