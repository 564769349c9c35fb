/// Byte-for-byte reference outputs for a mixed nested document: scalars,
/// nested objects three levels deep, and an array holding an object.
use dyncol_core::{create_query, update_query};

const DOCUMENT: &str = r#"{
    "test": "test",
    "qr": {
        "test": "tester",
        "rofl": {
            "jaja": "neinnein",
            "testagain": {
                "yip": "datworks",
                "boolean": true
            }
        }
    },
    "another": {
        "one": "yey another one!"
    },
    "arrayone": {
        "arr": ["arr", "imma pirate", {"yay": "ditworks"}]
    }
}"#;

const CREATE_EXPECTED: &str = "COLUMN_CREATE('test', 'test', 'arrayone', COLUMN_CREATE('arr', \
    COLUMN_CREATE('0', 'arr', '1', 'imma pirate', '2', COLUMN_CREATE('yay', \
    'ditworks'))), 'another', COLUMN_CREATE('one', 'yey another one!'), \
    'qr', COLUMN_CREATE('test', 'tester', 'rofl', COLUMN_CREATE('jaja', \
    'neinnein', 'testagain', COLUMN_CREATE('yip', 'datworks', 'boolean', 1 \
    AS unsigned integer))))";

const UPDATE_EXPECTED: &str = "COLUMN_ADD(`testTable`, 'test', 'test', 'arrayone', \
    COLUMN_ADD(COLUMN_GET(`testTable`, 'arrayone' AS BLOB), 'arr', \
    COLUMN_ADD(COLUMN_GET(COLUMN_GET(`testTable`, 'arrayone' AS BLOB), 'arr' \
    AS BLOB), '0', 'arr', '1', 'imma pirate', '2', \
    COLUMN_ADD(COLUMN_GET(COLUMN_GET(COLUMN_GET(`testTable`, 'arrayone' \
    AS BLOB), 'arr' AS BLOB), '2' AS BLOB), 'yay', 'ditworks'))), 'another', \
    COLUMN_ADD(COLUMN_GET(`testTable`, 'another' AS BLOB), 'one', \
    'yey another one!'), 'qr', COLUMN_ADD(COLUMN_GET(`testTable`, 'qr' \
    AS BLOB), 'test', 'tester', 'rofl', \
    COLUMN_ADD(COLUMN_GET(COLUMN_GET(`testTable`, 'qr' AS BLOB), 'rofl' \
    AS BLOB), 'jaja', 'neinnein', 'testagain', \
    COLUMN_ADD(COLUMN_GET(COLUMN_GET(COLUMN_GET(`testTable`, 'qr' AS BLOB), \
    'rofl' AS BLOB), 'testagain' AS BLOB), 'yip', 'datworks', 'boolean', 1 \
    AS unsigned integer))))";

#[test]
fn nested_create_matches_reference() {
    assert_eq!(create_query(DOCUMENT).unwrap(), CREATE_EXPECTED);
}

#[test]
fn nested_update_matches_reference() {
    assert_eq!(update_query("testTable", DOCUMENT).unwrap(), UPDATE_EXPECTED);
}

#[test]
fn reference_outputs_are_balanced() {
    for sql in [CREATE_EXPECTED, UPDATE_EXPECTED] {
        assert_eq!(sql.matches('(').count(), sql.matches(')').count());
    }
}
