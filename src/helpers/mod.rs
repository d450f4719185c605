mod time;

pub use time::now_epoch_millis;

pub fn rand_hex(bytes: usize) -> String {
    let rand: Vec<u8> = (0..bytes).map(|_| rand::random()).collect();
    hex::encode(rand)
}
