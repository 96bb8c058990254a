//! Known-answer tests from FIPS 202 and NIST SP 800-185.

use krypton_keccak::keccak::{BitString, DomainSuffix};
use krypton_keccak::{cshake, digest, kmac, ErrorKind, KeccakError, KeccakParameter, Session};

use KeccakParameter::*;

const KEY: &str = "404142434445464748494a4b4c4d4e4f505152535455565758595a5b5c5d5e5f";
const DATA: [u8; 4] = [0x00, 0x01, 0x02, 0x03];
const TAGGED: &[u8] = b"My Tagged Application";

fn key() -> Vec<u8> {
	hex::decode(KEY).unwrap()
}

fn check(parameter: KeccakParameter, message: &[u8], len: usize, expected: &str) {
	let out = digest(parameter, message, Some(len)).unwrap();
	assert_eq!(hex::encode(out), expected, "{}", parameter);
}

#[test]
fn sha3_empty_message() {
	check(Sha3_224, b"", 28, "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7");
	check(Sha3_256, b"", 32, "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a");
	check(
		Sha3_384,
		b"",
		48,
		"0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004",
	);
	check(
		Sha3_512,
		b"",
		64,
		"a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26",
	);
}

#[test]
fn sha3_abc() {
	check(Sha3_224, b"abc", 28, "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf");
	check(Sha3_256, b"abc", 32, "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532");
	check(
		Sha3_384,
		b"abc",
		48,
		"ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b298d88cea927ac7f539f1edf228376d25",
	);
	check(
		Sha3_512,
		b"abc",
		64,
		"b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0",
	);
}

#[test]
fn sha3_multi_block() {
	let message: Vec<u8> = (0 ..= 255).cycle().take(768).collect();

	check(Sha3_256, &message, 32, "c043b2b15d405c9f4cd92fdaef420eba6201d328fb34ec0e2c16e4981b9e4b39");
}

#[test]
fn shake_and_raw_shake() {
	check(Shake128, b"", 16, "7f9c2ba4e88f827d616045507605853e");
	check(Shake256, b"", 32, "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f");
	check(Shake256, b"abc", 32, "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739");
	check(RawShake128, b"", 16, "fa019a3b17630df6014853b5470773f1");
	check(RawShake256, b"", 32, "3a1108d4a90a31b85a10bdce77f4bfbdcc5b1d70dd405686f8bbde834aa1a410");
}

#[test]
fn cshake_vectors() {
	let out = cshake(CShake128, b"TAK", b"KAT", b"", Some(16)).unwrap();
	assert_eq!(hex::encode(out), "3284fd3b44c6d5e3a3acec6c81cebf62");

	let out = cshake(CShake256, b"TAK", b"KAT", b"", Some(32)).unwrap();
	assert_eq!(hex::encode(out), "c1495f818da538983d382ba9675cad7c44f5df0940d24a6c11d0edcabf235308");

	// SP 800-185 cSHAKE sample 1
	let out = cshake(CShake128, b"", b"Email Signature", &DATA, Some(32)).unwrap();
	assert_eq!(hex::encode(out), "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5");
}

#[test]
fn kmac_vectors() {
	let key = key();

	let out = kmac(Kmac128, &key, TAGGED, &DATA, Some(32)).unwrap();
	assert_eq!(hex::encode(out), "3b1fba963cd8b0b59e8c1a6d71888b7143651af8ba0a7070c0979e2811324aa5");

	let out = kmac(Kmac256, &key, TAGGED, &DATA, Some(64)).unwrap();
	assert_eq!(
		hex::encode(out),
		"20c570c31346f703c9ac36c61c03cb64c3970d0cfc787e9b79599d273a68d2f7f69d4cc3de9d104a351689f27cf6f5951f0103f33f4f24871024d9c27773a8dd",
	);

	// SP 800-185 KMAC sample 1, no customization
	let out = kmac(Kmac128, &key, b"", &DATA, Some(32)).unwrap();
	assert_eq!(hex::encode(out), "e5780b0d3ea6f7d3a429c5706aa43a00fadbd7d49628839e3187243f456ee14e");
}

#[test]
fn kmacxof_vectors() {
	let key = key();

	let out = kmac(KmacXof128, &key, TAGGED, &DATA, Some(16)).unwrap();
	assert_eq!(hex::encode(out), "31a44527b4ed9f5c6101d11de6d26f06");

	let out = kmac(KmacXof256, &key, TAGGED, &DATA, Some(32)).unwrap();
	assert_eq!(hex::encode(out), "1755133f1534752aad0748f2c706fb5c784512cab835cd15676b16c0c6647fa9");
}

#[test]
fn fixed_outputs_refuse_one_more_byte() {
	for parameter in [Sha3_224, Sha3_256, Sha3_384, Sha3_512] {
		let mut session = Session::new(parameter).unwrap();
		let mut cursor = session.finalize().unwrap();
		let limit = parameter.min_output_bytes();

		cursor.next_bytes(limit).unwrap();

		let err = cursor.next_byte().unwrap_err();
		assert_eq!(err, KeccakError::OutputExhausted {parameter, limit, requested: limit + 1});
		assert_eq!(err.kind(), ErrorKind::Bounds);
	}

	let mut mac = Session::builder(Kmac256).key(&key()).output_length(40).build().unwrap();
	let mut cursor = mac.finalize().unwrap();

	assert_eq!(cursor.by_ref().count(), 40);
	assert!(cursor.next_byte().is_err());
}

#[test]
fn extendable_outputs_keep_going() {
	let mut session = Session::new(Shake128).unwrap();
	let mut cursor = session.finalize().unwrap();

	let first = cursor.next_bytes(16).unwrap();
	assert_eq!(hex::encode(first), "7f9c2ba4e88f827d616045507605853e");

	cursor.next_bytes(100_000).unwrap();
	assert!(cursor.has_next());
	assert_eq!(cursor.emitted(), 100_016);
}

#[test]
fn misuse_is_typed() {
	let mut session = Session::new(Sha3_256).unwrap();
	let _cursor = session.finalize().unwrap();

	let err = session.update(b"late").unwrap_err();
	assert_eq!(err, KeccakError::AlreadyFinalized);
	assert_eq!(err.kind(), ErrorKind::State);

	let err = Session::new(Kmac128).err().unwrap();
	assert_eq!(err.kind(), ErrorKind::Configuration);

	assert_eq!(DomainSuffix::new(0, 9).unwrap_err().kind(), ErrorKind::Bounds);
	assert_eq!(BitString::new().append_bits(0, 12).unwrap_err().kind(), ErrorKind::Bounds);
}
