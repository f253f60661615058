use crate::domain::Severity;

pub struct CheckTemplate {
    pub rule: &'static str,
    pub severity: Severity,
    pub location_hint: &'static str,
    pub message: &'static str,
}

pub const COMPLIANCE_CHECKS: &[CheckTemplate] = &[
    CheckTemplate {
        rule: "TLS13-4.1.2",
        severity: Severity::High,
        location_hint: "ClientHello",
        message: "ClientHello omits the supported_versions extension required for TLS 1.3",
    },
    CheckTemplate {
        rule: "TLS13-4.4.4",
        severity: Severity::Critical,
        location_hint: "Finished",
        message: "Finished message is accepted before the transcript hash is verified",
    },
    CheckTemplate {
        rule: "TLS13-5.1",
        severity: Severity::Medium,
        location_hint: "record layer",
        message: "Record length may exceed 2^14 + 256 bytes for protected records",
    },
    CheckTemplate {
        rule: "DHCP-RFC2131-4.3.1",
        severity: Severity::High,
        location_hint: "DHCPOFFER",
        message: "Server does not include option 54 (server identifier) in DHCPOFFER",
    },
    CheckTemplate {
        rule: "DHCP-RFC2132-9.2",
        severity: Severity::Medium,
        location_hint: "option 51",
        message: "Lease time option is encoded with a length other than 4",
    },
    CheckTemplate {
        rule: "SNMP-RFC3416-4.2.1",
        severity: Severity::Medium,
        location_hint: "GetRequest-PDU",
        message: "noSuchObject is not returned for variables outside the MIB view",
    },
    CheckTemplate {
        rule: "SNMP-RFC3414-3.2",
        severity: Severity::Critical,
        location_hint: "USM",
        message: "Messages outside the time window are not discarded as notInTimeWindow",
    },
    CheckTemplate {
        rule: "TRDP-IEC61375-A.6",
        severity: Severity::High,
        location_hint: "PD header",
        message: "Process data sequence counter is not checked for duplicates",
    },
    CheckTemplate {
        rule: "TRDP-IEC61375-A.7",
        severity: Severity::Medium,
        location_hint: "MD reply",
        message: "Message data reply timeout is not reported to the caller",
    },
];

pub const STATIC_ANALYSIS_CHECKS: &[CheckTemplate] = &[
    CheckTemplate {
        rule: "buffer-length-unchecked",
        severity: Severity::Critical,
        location_hint: "src/parser.c",
        message: "Length field from the wire is used as a copy size without a bounds check",
    },
    CheckTemplate {
        rule: "integer-overflow",
        severity: Severity::High,
        location_hint: "src/codec.c",
        message: "Multiplication of two untrusted 16-bit fields may overflow",
    },
    CheckTemplate {
        rule: "state-machine-unreachable",
        severity: Severity::Medium,
        location_hint: "src/session.c",
        message: "State transition handler is unreachable from the initial state",
    },
    CheckTemplate {
        rule: "missing-timeout",
        severity: Severity::Medium,
        location_hint: "src/transport.c",
        message: "Blocking receive has no timeout and can stall the session",
    },
    CheckTemplate {
        rule: "uninitialized-read",
        severity: Severity::High,
        location_hint: "src/options.c",
        message: "Option buffer may be read before it is initialized",
    },
    CheckTemplate {
        rule: "unchecked-return",
        severity: Severity::Low,
        location_hint: "src/socket.c",
        message: "Return value of send is ignored",
    },
];
