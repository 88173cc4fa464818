#![no_main]

use libfuzzer_sys::fuzz_target;
use mime_media_type::grammar::is_token;
use mime_media_type::MediaType;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(media_type) = MediaType::parse(s) {
            // Re-parsing the display form must give the same structure.
            let reparsed =
                MediaType::parse(&media_type.to_string()).expect("display form reparses");
            assert_eq!(media_type, reparsed);
            assert_eq!(media_type.type_(), reparsed.type_());
            assert_eq!(media_type.subtype(), reparsed.subtype());
            assert!(media_type.parameters().eq(reparsed.parameters()));
            assert!(is_token(media_type.type_()) && is_token(media_type.subtype()));
            let _ = media_type.charset();
        }
    }
});
