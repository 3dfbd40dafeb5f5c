fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).ok_or("usage: bencode <file>")?;
    let content = std::fs::read(&path)?;
    let value = bencode::decode(&content)?;
    println!("{value:#?}");
    Ok(())
}
