//! An implementation of the ChaCha20 stream cipher with a 256-bit key, a
//! 96-bit nonce and a 32-bit block counter.
//!
//! The cipher XORs the message with a pseudorandom keystream, so applying it
//! twice with the same key, nonce and counter restores the original input;
//! every encrypt operation here is also the decrypt operation.
//!
//! This crate provides no authentication. A (key, nonce, counter) triple
//! must never be used for two different messages: XOR-ing two ciphertexts
//! produced under the same keystream exposes the XOR of the plaintexts.
//! Key and nonce acquisition are the caller's responsibility.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate core;
extern crate crypto_bytes;
extern crate crypto_buffers;
extern crate crypto_symmetric;

#[cfg(test)]
#[macro_use]
extern crate hex_literal;

use core::cmp;
use crypto_buffers::{BufferResult, RefReadBuffer, RefWriteBuffer};
use crypto_symmetric::{Encryptor, Decryptor, SynchronousStreamCipher,
                       SymmetricCipherError, symm_enc_or_dec};
use crypto_bytes::{read_u32_le, write_u32_le, xor_keystream};

/// RFC 8439 fixes the round count at 20: ten applications of the
/// column-then-diagonal double round.
const DOUBLE_ROUNDS: usize = 10;

#[derive(Copy)]
pub struct ChaCha20 {
    state  : [u32; 16],
    output : [u8; 64],
    offset : usize,
}

impl Clone for ChaCha20 { fn clone(&self) -> ChaCha20 { *self } }

/// The quarter round: add/xor/rotate mixing of four word slots of the state,
/// selected by index. All additions wrap modulo 2^32.
fn quarter_round(ws: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    ws[a] = ws[a].wrapping_add(ws[b]);
    ws[d] = (ws[d] ^ ws[a]).rotate_left(16);
    ws[c] = ws[c].wrapping_add(ws[d]);
    ws[b] = (ws[b] ^ ws[c]).rotate_left(12);
    ws[a] = ws[a].wrapping_add(ws[b]);
    ws[d] = (ws[d] ^ ws[a]).rotate_left(8);
    ws[c] = ws[c].wrapping_add(ws[d]);
    ws[b] = (ws[b] ^ ws[c]).rotate_left(7);
}

/// The block function: expand a 16-word state into 64 keystream bytes.
///
/// Runs the 20 rounds over a working copy, adds the original state back in
/// word-by-word (the feed-forward that keeps the rounds non-invertible from
/// the output), and serializes the result little-endian.
fn block(state: &[u32; 16], output: &mut [u8; 64]) {
    let mut ws = *state;

    for _ in 0..DOUBLE_ROUNDS {
        // columns
        quarter_round(&mut ws, 0, 4, 8, 12);
        quarter_round(&mut ws, 1, 5, 9, 13);
        quarter_round(&mut ws, 2, 6, 10, 14);
        quarter_round(&mut ws, 3, 7, 11, 15);
        // diagonals
        quarter_round(&mut ws, 0, 5, 10, 15);
        quarter_round(&mut ws, 1, 6, 11, 12);
        quarter_round(&mut ws, 2, 7, 8, 13);
        quarter_round(&mut ws, 3, 4, 9, 14);
    }

    for (w, s) in ws.iter_mut().zip(state.iter()) {
        *w = w.wrapping_add(*s);
    }

    for i in 0..16 {
        write_u32_le(&mut output[i * 4..(i + 1) * 4], ws[i]);
    }
}

impl ChaCha20 {
    /// Creates a cipher from a 32-byte key and a 12-byte nonce, with the
    /// block counter starting at 0. Key and nonce words are read
    /// little-endian. Panics on any other key or nonce length.
    pub fn new(key: &[u8], nonce: &[u8]) -> ChaCha20 {
        assert!(key.len() == 32);
        assert!(nonce.len() == 12);

        let mut key_words = [0u32; 8];
        for (i, word) in key_words.iter_mut().enumerate() {
            *word = read_u32_le(&key[i * 4..(i + 1) * 4]);
        }
        let mut nonce_words = [0u32; 3];
        for (i, word) in nonce_words.iter_mut().enumerate() {
            *word = read_u32_le(&nonce[i * 4..(i + 1) * 4]);
        }

        ChaCha20::with_words(&key_words, &nonce_words, 0)
    }

    /// Creates a cipher directly from key and nonce words and a starting
    /// block counter. No copy of the key outlives the returned state.
    pub fn with_words(key: &[u32; 8], nonce: &[u32; 3], counter: u32) -> ChaCha20 {
        ChaCha20 {
            state: ChaCha20::expand(key, nonce, counter),
            output: [0u8; 64],
            offset: 64,
        }
    }

    fn expand(key: &[u32; 8], nonce: &[u32; 3], counter: u32) -> [u32; 16] {
        let constant = b"expand 32-byte k";

        let mut state = [0u32; 16];
        for i in 0..4 {
            state[i] = read_u32_le(&constant[i * 4..(i + 1) * 4]);
        }
        state[4..12].copy_from_slice(key);
        state[12] = counter;
        state[13..16].copy_from_slice(nonce);
        state
    }

    // put the next 64 keystream bytes into self.output and advance the
    // block counter. The counter word wraps modulo 2^32: a stream longer
    // than 2^32 blocks under one nonce re-enters earlier keystream.
    fn update(&mut self) {
        block(&self.state, &mut self.output);
        self.state[12] = self.state[12].wrapping_add(1);
        self.offset = 0;
    }
}

impl SynchronousStreamCipher for ChaCha20 {
    fn process(&mut self, input: &[u8], output: &mut [u8]) {
        assert!(input.len() == output.len());
        let len = input.len();
        let mut i = 0;
        while i < len {
            // If there is no keystream available in the output buffer,
            // generate the next block.
            if self.offset == 64 {
                self.update();
            }

            // Process the min(available keystream, remaining input length).
            let count = cmp::min(64 - self.offset, len - i);
            xor_keystream(&mut output[i..i + count], &input[i..i + count],
                &self.output[self.offset..]);
            i += count;
            self.offset += count;
        }
    }
}

impl Encryptor for ChaCha20 {
    fn encrypt(&mut self, input: &mut RefReadBuffer, output: &mut RefWriteBuffer, _: bool)
            -> Result<BufferResult, SymmetricCipherError> {
        symm_enc_or_dec(self, input, output)
    }
}

impl Decryptor for ChaCha20 {
    fn decrypt(&mut self, input: &mut RefReadBuffer, output: &mut RefWriteBuffer, _: bool)
            -> Result<BufferResult, SymmetricCipherError> {
        symm_enc_or_dec(self, input, output)
    }
}

/// One-shot encryption of `input` under (key, nonce, counter). By the XOR
/// involution the same call decrypts: feeding a ciphertext back in with the
/// same parameters returns the plaintext.
#[cfg(feature = "std")]
pub fn encrypt(input: &[u8], key: &[u32; 8], nonce: &[u32; 3], counter: u32) -> Vec<u8> {
    let mut output = vec![0u8; input.len()];
    ChaCha20::with_words(key, nonce, counter).process(input, &mut output);
    output
}
