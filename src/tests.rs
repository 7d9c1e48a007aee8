//! Cross-cutting scenarios exercising the whole data model.

use serde_json::{json, Value as Json};

use crate::core::assurance::evidence::{
    DocumentType, EvidenceType, IdentityEvidence, ValidationMethodType,
};
use crate::core::assurance::{IdentityVerification, TrustFramework, VerifiedClaims};

fn full_verified_claims() -> Json {
    json!({
        "verification": {
            "trust_framework": "uk_tfida",
            "assurance_level": "medium",
            "time": "2021-05-11T14:29:00Z",
            "verification_process": "7675d80f-57e0-ab14-9543-26b41fc22",
            "evidence": [
                {
                    "type": "document",
                    "validation_method": { "type": "vcrypt" },
                    "verification_method": { "type": "bvr" },
                    "time": "2021-04-09T14:12:00Z",
                    "document_details": {
                        "type": "driving_permit",
                        "personal_number": "P123456789",
                        "document_number": "MORGA753116SM9IJ",
                        "date_of_issuance": "2021-01-01",
                        "date_of_expiry": "2030-12-31",
                        "issuer": {
                            "name": "DVLA",
                            "country_code": "GBR"
                        }
                    }
                },
                {
                    "type": "electronic_record",
                    "validation_method": { "type": "data" },
                    "time": "2021-04-09T14:12:00Z",
                    "record": {
                        "type": "mortgage_account",
                        "source": { "name": "TheCreditBureau" }
                    }
                },
                {
                    "type": "vouch",
                    "validation_method": { "type": "vpip" },
                    "time": "2020-03-19T12:42:00Z",
                    "attestation": {
                        "type": "written_attestation",
                        "reference_number": "6485-1619-3976-6671",
                        "date_of_issuance": "2020-03-19",
                        "voucher": {
                            "name": "Megan Ann Baker",
                            "street_address": "1234 Main St",
                            "locality": "Anytown"
                        }
                    }
                },
                {
                    "type": "electronic_signature",
                    "signature_type": "qes_eidas",
                    "issuer": "Certification Authority",
                    "serial_number": "1234567890",
                    "created_at": "2021-05-11T14:29:00Z"
                }
            ]
        },
        "claims": {
            "given_name": "Sarah",
            "family_name": "Meredyth",
            "birthdate": "1976-03-11"
        }
    })
}

#[test]
fn full_verified_claims_round_trip() {
    let input = full_verified_claims();
    let verified = VerifiedClaims::try_from(input.clone()).unwrap();

    // toJSONObject() reproduces the wire form, and parsing that reproduces
    // the value.
    assert_eq!(Json::from(verified.clone()), input);
    assert_eq!(
        VerifiedClaims::try_from(Json::from(verified.clone())).unwrap(),
        verified
    );

    let evidence = verified.verification().evidence().unwrap();
    assert_eq!(evidence.len(), 4);
    assert_eq!(evidence[0].evidence_type(), EvidenceType::Document);
    assert_eq!(evidence[1].evidence_type(), EvidenceType::ElectronicRecord);
    assert_eq!(evidence[2].evidence_type(), EvidenceType::Vouch);
    assert_eq!(evidence[3].evidence_type(), EvidenceType::ElectronicSignature);
}

#[test]
fn parsing_does_not_mutate_the_input() {
    let input = full_verified_claims();
    let snapshot = input.clone();
    let _ = VerifiedClaims::try_from(input.clone()).unwrap();
    assert_eq!(input, snapshot);

    let evidence_input = json!({
        "type": "vouch",
        "attestation": {
            "type": "digital_attestation",
            "voucher": { "name": "Peter Crowe", "locality": "Auckland" }
        }
    });
    let evidence_snapshot = evidence_input.clone();
    let _ = IdentityEvidence::try_from(evidence_input.clone()).unwrap();
    assert_eq!(evidence_input, evidence_snapshot);
}

#[test]
fn document_evidence_scenario() {
    let input = json!({
        "type": "document",
        "document_details": {
            "type": "passport",
            "document_number": "1234",
            "issuer": { "name": "Acme", "country_code": "DE" }
        }
    });

    let evidence = IdentityEvidence::try_from(input.clone()).unwrap();
    let IdentityEvidence::Document(document) = &evidence else {
        panic!("expected document evidence")
    };
    let details = document.document_details().unwrap();
    assert_eq!(details.document_type(), &DocumentType::Passport);
    assert_eq!(details.document_number().unwrap().as_str(), "1234");
    assert_eq!(details.issuer().unwrap().name().unwrap().as_str(), "Acme");
    assert_eq!(details.issuer().unwrap().country_code().unwrap().as_str(), "DE");

    // Re-serializing reproduces the same structure.
    assert_eq!(Json::from(evidence), input);
}

#[test]
fn vouch_evidence_scenario() {
    let input = json!({
        "type": "vouch",
        "attestation": {
            "type": "written_attestation",
            "voucher": {
                "name": "Megan Ann Baker",
                "street_address": "1234 Main St",
                "locality": "Anytown"
            }
        }
    });

    let evidence = IdentityEvidence::try_from(input).unwrap();
    let IdentityEvidence::Vouch(vouch) = &evidence else {
        panic!("expected vouch evidence")
    };
    let voucher = vouch.attestation().unwrap().voucher().unwrap();
    assert!(voucher.name().is_some());
    let address = voucher.address().unwrap();
    assert_eq!(address.street_address(), Some("1234 Main St"));
    assert_eq!(address.locality(), Some("Anytown"));
    assert_eq!(address.formatted(), None);
    assert_eq!(address.region(), None);
    assert_eq!(address.postal_code(), None);
    assert_eq!(address.country(), None);
}

#[test]
fn discriminator_fidelity_across_all_kinds() {
    let kinds = [
        ("document", EvidenceType::Document),
        ("electronic_record", EvidenceType::ElectronicRecord),
        ("vouch", EvidenceType::Vouch),
        ("qes", EvidenceType::Qes),
        ("utility_bill", EvidenceType::UtilityBill),
        ("id_document", EvidenceType::IdDocument),
    ];
    for (wire, expected) in kinds {
        let evidence = IdentityEvidence::try_from(json!({ "type": wire })).unwrap();
        assert_eq!(evidence.evidence_type(), expected);
        assert_eq!(Json::from(evidence), json!({ "type": wire }));
    }

    // The only kind whose minimal form needs more than the discriminator.
    let signature = IdentityEvidence::try_from(json!({
        "type": "electronic_signature",
        "signature_type": "qes_eidas"
    }))
    .unwrap();
    assert_eq!(signature.evidence_type(), EvidenceType::ElectronicSignature);
}

#[test]
fn evidence_works_through_serde() {
    // The serde path goes through the same conversions as try_from.
    let evidence: IdentityEvidence = serde_json::from_value(json!({
        "type": "document",
        "validation_method": { "type": "vri" }
    }))
    .unwrap();
    let IdentityEvidence::Document(document) = &evidence else {
        panic!("expected document evidence")
    };
    assert_eq!(
        document.validation_method().unwrap().method_type(),
        &ValidationMethodType::Vri
    );
    assert_eq!(
        serde_json::to_value(evidence).unwrap(),
        json!({ "type": "document", "validation_method": { "type": "vri" } })
    );

    let err = serde_json::from_value::<IdentityEvidence>(json!({ "type": "dna_sample" }))
        .unwrap_err();
    assert!(err.to_string().contains("unsupported evidence type: dna_sample"));
}

#[test]
fn constructed_and_parsed_values_agree() {
    let constructed = IdentityVerification::new(TrustFramework::Nist800_63A);
    let parsed =
        IdentityVerification::try_from(json!({ "trust_framework": "nist_800_63a" })).unwrap();
    assert_eq!(constructed, parsed);
}
