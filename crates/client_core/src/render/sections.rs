//! Fixed section layout for each document type.

use shared::domain::DocumentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    List,
    Object,
    Table(&'static [&'static str]),
    /// Layout chosen from the value's shape.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub field: &'static str,
    pub title: &'static str,
    pub id: &'static str,
    pub kind: SectionKind,
}

const fn spec(
    field: &'static str,
    title: &'static str,
    id: &'static str,
    kind: SectionKind,
) -> SectionSpec {
    SectionSpec {
        field,
        title,
        id,
        kind,
    }
}

use SectionKind::{Auto, List, Object, Table, Text};

const USER_STORY: &[SectionSpec] = &[
    spec("business_goal", "Business Goal", "business-goal", Text),
    spec("actor", "Actor", "actor", Text),
    spec("trigger", "Trigger", "trigger", Text),
    spec("preconditions", "Preconditions", "preconditions", List),
    spec("functional_flow", "Functional Flow", "functional-flow", List),
    spec("validations", "Validations", "validations", List),
    spec("acceptance_criteria", "Acceptance Criteria", "acceptance-criteria", List),
    spec("security", "Security", "security", List),
    spec("dependencies", "Dependencies", "dependencies", List),
    spec("risks", "Risks", "risks", List),
];

const BRD: &[SectionSpec] = &[
    spec("project_name", "Project Name", "project-name", Text),
    spec("executive_summary", "Executive Summary", "executive-summary", Object),
    spec(
        "business_objectives",
        "Business Objectives",
        "business-objectives",
        Table(&["Objective", "KPI"]),
    ),
    spec("scope", "Project Scope", "scope", Object),
    spec(
        "stakeholders",
        "Stakeholder List",
        "stakeholders",
        Table(&["Name", "Role", "Department", "Responsibilities"]),
    ),
    spec("current_state", "Current State Analysis", "current-state", Object),
    spec("future_state", "Future State Vision", "future-state", Object),
    spec(
        "business_requirements",
        "Business Requirements",
        "business-requirements",
        Table(&[
            "BR ID",
            "Title",
            "Description",
            "Priority",
            "Source",
            "Acceptance Criteria",
        ]),
    ),
    spec(
        "business_rules",
        "Business Rules",
        "business-rules",
        Table(&["Rule ID", "Description"]),
    ),
    spec("assumptions", "Assumptions", "assumptions", List),
    spec("dependencies", "Dependencies", "dependencies", List),
    spec(
        "risks",
        "Risk Assessment",
        "risks",
        Table(&["Risk ID", "Description", "Impact", "Likelihood", "Mitigation"]),
    ),
    spec(
        "success_metrics",
        "Success Metrics",
        "success-metrics",
        Table(&[
            "Metric Name",
            "Measurement Method",
            "Target Value",
            "Monitoring Frequency",
        ]),
    ),
    spec("glossary", "Glossary", "glossary", Table(&["Term", "Definition"])),
    spec(
        "approval_workflow",
        "Approval Workflow",
        "approval-workflow",
        Table(&["Step", "Approver Role", "Approver Name", "Approval Criteria"]),
    ),
    spec(
        "supporting_documents",
        "Supporting Documents",
        "supporting-documents",
        List,
    ),
];

const FRD: &[SectionSpec] = &[
    spec("system_overview", "System Overview", "system-overview", Object),
    spec(
        "functional_requirements",
        "Functional Requirements",
        "functional-requirements",
        Table(&["Req ID", "Title", "Description", "Priority", "Acceptance Criteria"]),
    ),
    spec("data_requirements", "Data Requirements", "data-requirements", Object),
    spec(
        "interface_requirements",
        "Interface Requirements",
        "interface-requirements",
        Object,
    ),
    spec(
        "integration_requirements",
        "Integration Requirements",
        "integration-requirements",
        Table(&["System", "Method", "Data Format", "Frequency"]),
    ),
    spec(
        "performance_requirements",
        "Performance Requirements",
        "performance-requirements",
        Object,
    ),
    spec(
        "security_requirements",
        "Security Requirements",
        "security-requirements",
        List,
    ),
    spec(
        "validation_rules",
        "Validation Rules",
        "validation-rules",
        Table(&["Field", "Rule", "Error Message"]),
    ),
    spec(
        "error_handling",
        "Error Handling",
        "error-handling",
        Table(&["Error Type", "Handling Strategy", "User Message", "Logging"]),
    ),
    spec(
        "reporting_requirements",
        "Reporting Requirements",
        "reporting-requirements",
        Table(&["Report Name", "Description", "Frequency", "Format"]),
    ),
    spec(
        "testing_requirements",
        "Testing Requirements",
        "testing-requirements",
        Object,
    ),
    spec(
        "deployment_requirements",
        "Deployment Requirements",
        "deployment-requirements",
        Object,
    ),
    spec(
        "maintenance_requirements",
        "Maintenance Requirements",
        "maintenance-requirements",
        Object,
    ),
    spec(
        "technical_specifications",
        "Technical Specifications",
        "technical-specifications",
        Table(&["Component", "Specification"]),
    ),
];

const SRD: &[SectionSpec] = &[
    spec("system_architecture", "System Architecture", "system-architecture", Object),
    spec(
        "hardware_requirements",
        "Hardware Requirements",
        "hardware-requirements",
        Object,
    ),
    spec(
        "software_requirements",
        "Software Requirements",
        "software-requirements",
        Object,
    ),
    spec(
        "network_requirements",
        "Network Requirements",
        "network-requirements",
        Object,
    ),
    spec(
        "database_requirements",
        "Database Requirements",
        "database-requirements",
        Object,
    ),
    spec(
        "system_interfaces",
        "System Interfaces",
        "system-interfaces",
        Table(&["Interface", "Type", "Protocol", "Data Format"]),
    ),
    spec(
        "performance_specifications",
        "Performance Specifications",
        "performance-specifications",
        Object,
    ),
    spec(
        "security_architecture",
        "Security Architecture",
        "security-architecture",
        Object,
    ),
    spec("backup_recovery", "Backup & Recovery", "backup-recovery", Object),
    spec("monitoring_logging", "Monitoring & Logging", "monitoring-logging", Object),
    spec(
        "scalability_requirements",
        "Scalability Requirements",
        "scalability-requirements",
        Object,
    ),
    spec(
        "compliance_standards",
        "Compliance Standards",
        "compliance-standards",
        Table(&["Standard", "Description"]),
    ),
];

const CHANGE_REQUEST: &[SectionSpec] = &[
    spec("change_request_id", "Change Request ID", "change-request-id", Auto),
    spec(
        "business_justification",
        "Business Justification",
        "business-justification",
        Auto,
    ),
    spec(
        "requestor_information",
        "Requestor Information",
        "requestor-information",
        Auto,
    ),
    spec("impact_analysis", "Impact Analysis", "impact-analysis", Auto),
    spec("current_state", "Current State", "current-state", Auto),
    spec("proposed_changes", "Proposed Changes", "proposed-changes", Auto),
    spec("risk_assessment", "Risk Assessment", "risk-assessment", Auto),
    spec(
        "cost_benefit_analysis",
        "Cost Benefit Analysis",
        "cost-benefit-analysis",
        Auto,
    ),
    spec(
        "implementation_timeline",
        "Implementation Timeline",
        "implementation-timeline",
        Auto,
    ),
    spec("stakeholder_impact", "Stakeholder Impact", "stakeholder-impact", Auto),
    spec(
        "testing_requirements",
        "Testing Requirements",
        "testing-requirements",
        Auto,
    ),
    spec("approval_workflow", "Approval Workflow", "approval-workflow", Auto),
    spec("rollback_plan", "Rollback Plan", "rollback-plan", Auto),
    spec("success_metrics", "Success Metrics", "success-metrics", Auto),
    spec(
        "supporting_documents",
        "Supporting Documents",
        "supporting-documents",
        Auto,
    ),
];

pub fn sections_for(document_type: DocumentType) -> &'static [SectionSpec] {
    match document_type {
        DocumentType::UserStory => USER_STORY,
        DocumentType::Brd => BRD,
        DocumentType::Frd => FRD,
        DocumentType::Srd => SRD,
        DocumentType::ChangeRequest => CHANGE_REQUEST,
    }
}
