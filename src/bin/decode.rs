use std::{env, fs};
use scandecode::{profiles, resolve, ChapterContext, ObfuscatedPayload};

fn main() {
    let mut args = env::args().skip(1);
    let site = args.next().expect("no site given");
    let path = args.next().expect("no payload file given");

    let mut ctx = ChapterContext::new();
    for arg in args {
        let (name, value) = arg.split_once('=').expect("parameters are name=value");
        ctx.set(name, value);
    }

    let registry = profiles::registry();
    let profile = registry.get(site.as_str()).unwrap_or_else(|| {
        let known: Vec<_> = registry.keys().cloned().collect();
        panic!("unknown site {:?}, expected one of {:?}", site, known)
    });

    let payload = fs::read_to_string(&path).expect("can't read payload file");
    let pages = resolve(profile, ObfuscatedPayload::Text(payload.trim()), &ctx)
        .expect("decode failed");

    for page in pages {
        println!("{} {}", page.index, page.url);
    }
}
