use rand::Rng;

const ADDRESS_PREFIX: &str = "bc1";
const ADDRESS_BODY_LEN: usize = 38;
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// Placeholder pattern, not an encoding of the address.
const QR_MODULES: [&str; 12] = [
    "#######..#.#",
    "#.....#.##.#",
    "#.###.#..#.#",
    "#.###.###..#",
    "#.###..#.#..",
    "#.....######",
    "#######.#.#.",
    ".#....##.##.",
    "###.#####.##",
    "..#..#...#..",
    "#######.#...",
    "#.....##.##.",
];
const QR_SIZE: usize = 256;
const QR_MARGIN: usize = 32;
const QR_MODULE_SIZE: usize = 16;

/// Generates a random address-shaped string. It is not a valid address.
pub fn generate_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut address = String::with_capacity(ADDRESS_PREFIX.len() + ADDRESS_BODY_LEN);
    address.push_str(ADDRESS_PREFIX);
    for _ in 0..ADDRESS_BODY_LEN {
        let i = rng.gen_range(0..BASE58_ALPHABET.len());
        address.push(BASE58_ALPHABET[i] as char);
    }

    address
}

/// The placeholder QR image as an SVG data URL.
pub fn placeholder_qr() -> String {
    let mut svg = format!(
        "data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" \
         width=\"{QR_SIZE}\" height=\"{QR_SIZE}\" viewBox=\"0 0 {QR_SIZE} {QR_SIZE}\">\
         <rect width=\"{QR_SIZE}\" height=\"{QR_SIZE}\" fill=\"white\" />"
    );

    for (row, line) in QR_MODULES.iter().enumerate() {
        for (col, _) in line.bytes().enumerate().filter(|(_, b)| *b == b'#') {
            let x = QR_MARGIN + col * QR_MODULE_SIZE;
            let y = QR_MARGIN + row * QR_MODULE_SIZE;
            svg.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{QR_MODULE_SIZE}\" \
                 height=\"{QR_MODULE_SIZE}\" fill=\"black\" />"
            ));
        }
    }
    svg.push_str("</svg>");

    svg
}

/// What the receive screen shows: a fresh address and its QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveRequest {
    pub address: String,
    pub qr: String,
}

impl ReceiveRequest {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ReceiveRequest {
            address: generate_address(rng),
            qr: placeholder_qr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng as _;

    #[test]
    fn addresses_look_like_bech32() {
        let mut rng = StdRng::seed_from_u64(7);
        let address = generate_address(&mut rng);

        assert_eq!(address.len(), 41);
        assert!(address.starts_with("bc1"));
        assert!(address[3..].bytes().all(|b| BASE58_ALPHABET.contains(&b)));
        assert!(!address[3..].contains(&['0', 'O', 'I', 'l'][..]));
    }

    #[test]
    fn addresses_differ() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = generate_address(&mut rng);
        let b = generate_address(&mut rng);

        assert_ne!(a, b);
    }

    #[test]
    fn qr_is_an_svg_data_url() {
        let qr = placeholder_qr();
        let modules = QR_MODULES.iter().flat_map(|l| l.bytes()).filter(|b| *b == b'#');

        assert!(qr.starts_with("data:image/svg+xml;utf8,<svg"));
        assert!(qr.ends_with("</svg>"));
        assert!(qr.contains("<rect x=\"32\" y=\"32\" width=\"16\" height=\"16\" fill=\"black\" />"));
        assert!(qr.contains("<rect x=\"192\" y=\"208\" width=\"16\" height=\"16\" fill=\"black\" />"));
        assert_eq!(qr.matches("fill=\"black\"").count(), modules.count());
    }

    #[test]
    fn receive_request_pairs_address_with_qr() {
        let mut rng = StdRng::seed_from_u64(1);
        let request = ReceiveRequest::new(&mut rng);

        assert!(request.address.starts_with("bc1"));
        assert_eq!(request.qr, placeholder_qr());
    }
}
