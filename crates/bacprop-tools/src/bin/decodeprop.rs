use bacprop_core::encoding::reader::Reader;
use bacprop_core::types::{ObjectType, PropertyId};
use bacprop_core::{ConstructedData, PropertyArgs};
use bacprop_tools::{format_hex, parse_hex, ObjectTypeArg};
use clap::Parser;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "bacnet-decodeprop")]
struct Args {
    #[arg(long, value_enum, required_unless_present = "object_type_raw")]
    object_type: Option<ObjectTypeArg>,
    #[arg(long, conflicts_with = "object_type")]
    object_type_raw: Option<u16>,
    /// Property identifier number.
    #[arg(long)]
    property: u32,
    #[arg(long, default_value_t = 3)]
    tag_number: u8,
    #[arg(long)]
    array_index: Option<u64>,
    /// Print the decoded value as JSON.
    #[arg(long)]
    json: bool,
    /// Re-encode and fail unless the bytes match the input.
    #[arg(long)]
    verify: bool,
    /// Hex bytes, starting with the opening tag. Read from stdin when absent.
    hex: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let object_type = match (args.object_type, args.object_type_raw) {
        (Some(arg), _) => arg.into_object_type(),
        (None, Some(raw)) => ObjectType::from_u16(raw),
        (None, None) => return Err("an object type is required".into()),
    };
    let text = match args.hex {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let bytes = parse_hex(&text)?;

    let property_args = PropertyArgs::new(object_type, PropertyId::from_u32(args.property))
        .with_tag_number(args.tag_number)
        .with_array_index(args.array_index);
    log::debug!("decoding {} bytes as {property_args:?}", bytes.len());

    let mut r = Reader::new(&bytes);
    let data = match ConstructedData::decode(&mut r, property_args) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("decode failed: {e}");
            std::process::exit(1);
        }
    };
    if !r.is_empty() {
        eprintln!("warning: {} trailing bytes ignored", r.remaining());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        match data.codec() {
            Some(codec) => println!("{}.{}", codec.type_name, codec.field_name),
            None => println!("unspecified data"),
        }
        println!("{:#?}", data.value());
    }

    if args.verify {
        let encoded = data.to_vec()?;
        let consumed = &bytes[..r.position()];
        if encoded != consumed {
            eprintln!("round-trip mismatch");
            eprintln!("  input:   {}", format_hex(consumed));
            eprintln!("  encoded: {}", format_hex(&encoded));
            std::process::exit(2);
        }
        println!("round-trip ok ({} bytes)", encoded.len());
    }
    Ok(())
}
