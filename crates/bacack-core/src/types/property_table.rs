/// Read-only mapping between property identifiers and their BACnet names.
///
/// Decoding never consults a table; callers pass one wherever names matter,
/// so a trimmed or vendor-extended table can stand in for
/// [`STANDARD_PROPERTIES`].
#[derive(Debug, Clone, Copy)]
pub struct PropertyTable<'a> {
    entries: &'a [(u32, &'a str)],
}

impl<'a> PropertyTable<'a> {
    pub const fn new(entries: &'a [(u32, &'a str)]) -> Self {
        Self { entries }
    }

    pub fn name(&self, id: u32) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, name)| *name)
    }

    /// Looks a name up, accepting `object-name`, `object_name`, or `OBJECT-NAME`.
    pub fn id(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, entry)| names_match(entry, name))
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn names_match(entry: &str, query: &str) -> bool {
    entry.len() == query.len()
        && entry.bytes().zip(query.bytes()).all(|(a, b)| {
            let b = if b == b'_' { b'-' } else { b.to_ascii_lowercase() };
            a == b
        })
}

pub static STANDARD_PROPERTIES: PropertyTable<'static> = PropertyTable::new(&[
    (0, "acked-transitions"),
    (1, "ack-required"),
    (2, "action"),
    (3, "action-text"),
    (4, "active-text"),
    (5, "active-vt-sessions"),
    (6, "alarm-value"),
    (7, "alarm-values"),
    (8, "all"),
    (9, "all-writes-successful"),
    (10, "apdu-segment-timeout"),
    (11, "apdu-timeout"),
    (12, "application-software-version"),
    (13, "archive"),
    (14, "bias"),
    (15, "change-of-state-count"),
    (16, "change-of-state-time"),
    (17, "notification-class"),
    (19, "controlled-variable-reference"),
    (20, "controlled-variable-units"),
    (21, "controlled-variable-value"),
    (22, "cov-increment"),
    (23, "date-list"),
    (24, "daylight-savings-status"),
    (25, "deadband"),
    (26, "derivative-constant"),
    (27, "derivative-constant-units"),
    (28, "description"),
    (29, "description-of-halt"),
    (30, "device-address-binding"),
    (31, "device-type"),
    (32, "effective-period"),
    (33, "elapsed-active-time"),
    (34, "error-limit"),
    (35, "event-enable"),
    (36, "event-state"),
    (37, "event-type"),
    (38, "exception-schedule"),
    (39, "fault-values"),
    (40, "feedback-value"),
    (41, "file-access-method"),
    (42, "file-size"),
    (43, "file-type"),
    (44, "firmware-revision"),
    (45, "high-limit"),
    (46, "inactive-text"),
    (47, "in-process"),
    (48, "instance-of"),
    (49, "integral-constant"),
    (50, "integral-constant-units"),
    (52, "limit-enable"),
    (53, "list-of-group-members"),
    (54, "list-of-object-property-references"),
    (56, "local-date"),
    (57, "local-time"),
    (58, "location"),
    (59, "low-limit"),
    (60, "manipulated-variable-reference"),
    (61, "maximum-output"),
    (62, "max-apdu-length-accepted"),
    (63, "max-info-frames"),
    (64, "max-master"),
    (65, "max-pres-value"),
    (66, "minimum-off-time"),
    (67, "minimum-on-time"),
    (68, "minimum-output"),
    (69, "min-pres-value"),
    (70, "model-name"),
    (71, "modification-date"),
    (72, "notify-type"),
    (73, "number-of-apdu-retries"),
    (74, "number-of-states"),
    (75, "object-identifier"),
    (76, "object-list"),
    (77, "object-name"),
    (78, "object-property-reference"),
    (79, "object-type"),
    (80, "optional"),
    (81, "out-of-service"),
    (82, "output-units"),
    (83, "event-parameters"),
    (84, "polarity"),
    (85, "present-value"),
    (86, "priority"),
    (87, "priority-array"),
    (88, "priority-for-writing"),
    (89, "process-identifier"),
    (90, "program-change"),
    (91, "program-location"),
    (92, "program-state"),
    (93, "proportional-constant"),
    (94, "proportional-constant-units"),
    (96, "protocol-object-types-supported"),
    (97, "protocol-services-supported"),
    (98, "protocol-version"),
    (99, "read-only"),
    (100, "reason-for-halt"),
    (102, "recipient-list"),
    (103, "reliability"),
    (104, "relinquish-default"),
    (105, "required"),
    (106, "resolution"),
    (107, "segmentation-supported"),
    (108, "setpoint"),
    (109, "setpoint-reference"),
    (110, "state-text"),
    (111, "status-flags"),
    (112, "system-status"),
    (113, "time-delay"),
    (114, "time-of-active-time-reset"),
    (115, "time-of-state-count-reset"),
    (116, "time-synchronization-recipients"),
    (117, "units"),
    (118, "update-interval"),
    (119, "utc-offset"),
    (120, "vendor-identifier"),
    (121, "vendor-name"),
    (122, "vt-classes-supported"),
    (123, "weekly-schedule"),
    (124, "attempted-samples"),
    (125, "average-value"),
    (126, "buffer-size"),
    (127, "client-cov-increment"),
    (128, "cov-resubscription-interval"),
    (130, "event-time-stamps"),
    (131, "log-buffer"),
    (132, "log-device-object-property"),
    (133, "enable"),
    (134, "log-interval"),
    (135, "maximum-value"),
    (136, "minimum-value"),
    (137, "notification-threshold"),
    (139, "protocol-revision"),
    (140, "records-since-notification"),
    (141, "record-count"),
    (142, "start-time"),
    (143, "stop-time"),
    (144, "stop-when-full"),
    (145, "total-record-count"),
    (146, "valid-samples"),
    (147, "window-interval"),
    (148, "window-samples"),
    (149, "maximum-value-timestamp"),
    (150, "minimum-value-timestamp"),
    (151, "variance-value"),
    (152, "active-cov-subscriptions"),
    (153, "backup-failure-timeout"),
    (154, "configuration-files"),
    (155, "database-revision"),
    (156, "direct-reading"),
    (157, "last-restore-time"),
    (158, "maintenance-required"),
    (159, "member-of"),
    (160, "mode"),
    (161, "operation-expected"),
    (162, "setting"),
    (163, "silenced"),
    (164, "tracking-value"),
    (165, "zone-members"),
    (166, "life-safety-alarm-values"),
    (167, "max-segments-accepted"),
    (168, "profile-name"),
]);
