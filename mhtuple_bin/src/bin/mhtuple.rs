use clap::{Parser, Subcommand};
use log::info;
use mhtuple::{
    codec,
    fixed_width::{Slot, StaticSizeSerializable},
    Multihash,
};

/// Convert IPFS multihashes to and from the (digest, hashFunction, size) tuple
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a base58 multihash into digest, hash function and size
    Decode { multihash: String },
    /// Join digest, hash function and size back into a base58 multihash
    Encode {
        #[arg(long)]
        digest: String,
        #[arg(long)]
        hash_function: u8,
        #[arg(long)]
        size: u8,
        /// Fail if size does not match the digest length
        #[arg(long)]
        strict: bool,
    },
    /// Print the 34-byte storage slot for a base58 multihash
    Slot { multihash: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    info!("{:?}", args.command);

    match args.command {
        Command::Decode { multihash } => {
            let m = codec::decode(&multihash)?;
            println!("digest:       {}", m.digest());
            println!("hashFunction: {}", m.hash_function());
            println!("size:         {}", m.size());
        }
        Command::Encode { digest, hash_function, size, strict } => {
            let m = Multihash::new(digest, hash_function, size);
            let encoded = if strict { codec::encode_strict(&m)? } else { codec::encode(&m)? };
            match encoded {
                Some(s) => println!("{}", s),
                None => println!("null"),
            }
        }
        Command::Slot { multihash } => {
            let slot: Slot = Some(codec::decode(&multihash)?);
            println!("0x{}", hex::encode(slot.to_bytes()?));
        }
    }

    Ok(())
}
