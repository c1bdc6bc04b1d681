// ABOUTME: Well-known WSP content-type and push application-id token tables
// ABOUTME: Lookups are case-insensitive; a miss means the caller writes the literal string instead

/// WSP well-known content types (WAP-230 table 40, up to WSP 1.5)
static CONTENT_TYPES: &[(&str, u8)] = &[
    ("*/*", 0x00),
    ("text/*", 0x01),
    ("text/html", 0x02),
    ("text/plain", 0x03),
    ("text/x-hdml", 0x04),
    ("text/x-ttml", 0x05),
    ("text/x-vcalendar", 0x06),
    ("text/x-vcard", 0x07),
    ("text/vnd.wap.wml", 0x08),
    ("text/vnd.wap.wmlscript", 0x09),
    ("text/vnd.wap.wta-event", 0x0A),
    ("multipart/*", 0x0B),
    ("multipart/mixed", 0x0C),
    ("multipart/form-data", 0x0D),
    ("multipart/byteranges", 0x0E),
    ("multipart/alternative", 0x0F),
    ("application/*", 0x10),
    ("application/java-vm", 0x11),
    ("application/x-www-form-urlencoded", 0x12),
    ("application/x-hdmlc", 0x13),
    ("application/vnd.wap.wmlc", 0x14),
    ("application/vnd.wap.wmlscriptc", 0x15),
    ("application/vnd.wap.wta-eventc", 0x16),
    ("application/vnd.wap.uaprof", 0x17),
    ("application/vnd.wap.wtls-ca-certificate", 0x18),
    ("application/vnd.wap.wtls-user-certificate", 0x19),
    ("application/x-x509-ca-cert", 0x1A),
    ("application/x-x509-user-cert", 0x1B),
    ("image/*", 0x1C),
    ("image/gif", 0x1D),
    ("image/jpeg", 0x1E),
    ("image/tiff", 0x1F),
    ("image/png", 0x20),
    ("image/vnd.wap.wbmp", 0x21),
    ("application/vnd.wap.multipart.*", 0x22),
    ("application/vnd.wap.multipart.mixed", 0x23),
    ("application/vnd.wap.multipart.form-data", 0x24),
    ("application/vnd.wap.multipart.byteranges", 0x25),
    ("application/vnd.wap.multipart.alternative", 0x26),
    ("application/xml", 0x27),
    ("text/xml", 0x28),
    ("application/vnd.wap.wbxml", 0x29),
    ("application/x-x968-cross-cert", 0x2A),
    ("application/x-x968-ca-cert", 0x2B),
    ("application/x-x968-user-cert", 0x2C),
    ("text/vnd.wap.si", 0x2D),
    // WSP 1.2
    ("application/vnd.wap.sic", 0x2E),
    ("text/vnd.wap.sl", 0x2F),
    ("application/vnd.wap.slc", 0x30),
    ("text/vnd.wap.co", 0x31),
    ("application/vnd.wap.coc", 0x32),
    ("application/vnd.wap.multipart.related", 0x33),
    ("application/vnd.wap.sia", 0x34),
    // WSP 1.3
    ("text/vnd.wap.connectivity-xml", 0x35),
    ("application/vnd.wap.connectivity-wbxml", 0x36),
    // WSP 1.4
    ("application/pkcs7-mime", 0x37),
    ("application/vnd.wap.hashed-certificate", 0x38),
    ("application/vnd.wap.signed-certificate", 0x39),
    ("application/vnd.wap.cert-response", 0x3A),
    ("application/xhtml+xml", 0x3B),
    ("application/wml+xml", 0x3C),
    ("text/css", 0x3D),
    ("application/vnd.wap.mms-message", 0x3E),
    ("application/vnd.wap.rollover-certificate", 0x3F),
    // WSP 1.5
    ("application/vnd.wap.locc+wbxml", 0x40),
    ("application/vnd.wap.loc+xml", 0x41),
    ("application/vnd.syncml.dm+wbxml", 0x42),
    ("application/vnd.syncml.dm+xml", 0x43),
    ("application/vnd.syncml.notification", 0x44),
    ("application/vnd.wap.xhtml+xml", 0x45),
    ("application/vnd.wv.csp.cir", 0x46),
    ("application/vnd.oma.dd+xml", 0x47),
    ("application/vnd.oma.drm.message", 0x48),
    ("application/vnd.oma.drm.content", 0x49),
    ("application/vnd.oma.drm.rights+xml", 0x4A),
    ("application/vnd.oma.drm.rights+wbxml", 0x4B),
];

/// Registered push application ids (OMNA push-app-id registry)
static APPLICATION_IDS: &[(&str, u32)] = &[
    ("x-wap-application:*", 0x00),
    ("x-wap-application:push.sia", 0x01),
    ("x-wap-application:wml.ua", 0x02),
    ("x-wap-application:wta.ua", 0x03),
    ("x-wap-application:mms.ua", 0x04),
    ("x-wap-application:push.syncml", 0x05),
    ("x-wap-application:loc.ua", 0x06),
    ("x-wap-application:syncml.dm", 0x07),
    ("x-wap-application:drm.ua", 0x08),
    ("x-wap-application:emn.ua", 0x09),
    ("x-wap-application:wv.ua", 0x0A),
    ("x-wap-microsoft:localcontent.ua", 0x8000),
    ("x-wap-microsoft:imclient.ua", 0x8001),
    ("x-wap-docomo:imode.mail.ua", 0x8002),
    ("x-wap-docomo:imode.mr.ua", 0x8003),
    ("x-wap-docomo:imode.mf.ua", 0x8004),
    ("x-motorola:location.ua", 0x8005),
    ("x-motorola:now.ua", 0x8006),
    ("x-motorola:otaprov.ua", 0x8007),
    ("x-motorola:browser.ua", 0x8008),
    ("x-motorola:splash.ua", 0x8009),
    ("x-wap-nai:mvsw.command", 0x800B),
    ("x-wap-openwave:iota.ua", 0x8010),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|&(_, token)| token)
}

/// Token for a well-known content type
pub fn content_type_token(content_type: &str) -> Option<u8> {
    lookup(CONTENT_TYPES, content_type)
}

/// Assigned number for a registered push application id
pub fn application_id_token(application_id: &str) -> Option<u32> {
    lookup(APPLICATION_IDS, application_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_hits() {
        assert_eq!(content_type_token("*/*"), Some(0x00));
        assert_eq!(content_type_token("application/vnd.wap.sic"), Some(0x2E));
        assert_eq!(content_type_token("application/vnd.wap.slc"), Some(0x30));
        assert_eq!(
            content_type_token("application/vnd.wap.connectivity-wbxml"),
            Some(0x36)
        );
        assert_eq!(content_type_token("application/vnd.oma.drm.rights+wbxml"), Some(0x4B));
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert_eq!(content_type_token("TEXT/PLAIN"), Some(0x03));
        assert_eq!(content_type_token("text/x-vCalendar"), Some(0x06));
    }

    #[test]
    fn test_content_type_miss() {
        assert_eq!(content_type_token("application/x-custom"), None);
        assert_eq!(content_type_token("text/plain; charset=utf-8"), None);
    }

    #[test]
    fn test_application_ids() {
        assert_eq!(application_id_token("x-wap-application:wml.ua"), Some(0x02));
        assert_eq!(application_id_token("X-WAP-Application:MMS.ua"), Some(0x04));
        assert_eq!(application_id_token("x-wap-microsoft:imclient.ua"), Some(0x8001));
        assert_eq!(application_id_token("x-wap-openwave:iota.ua"), Some(0x8010));
        assert_eq!(application_id_token("x-example:unknown.ua"), None);
    }

    #[test]
    fn test_tables_have_unique_names() {
        for (i, (name, _)) in CONTENT_TYPES.iter().enumerate() {
            assert!(
                CONTENT_TYPES[i + 1..]
                    .iter()
                    .all(|(other, _)| !other.eq_ignore_ascii_case(name)),
                "duplicate content type {name}"
            );
        }
    }
}
