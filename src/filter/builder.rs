use log::trace;

use crate::models::filter::{Direction, Endpoint, EndpointFilterRequest, FilterGoal, Purpose};

/// Protocols tried when a display filter has a port but no protocol
const DISPLAY_PORT_PROTOCOLS: [&str; 2] = ["tcp", "udp"];

/// Render the filter expression for a single endpoint.
///
/// The result has the shape `[not ](<src clause> or <dst clause>)`. Each
/// clause joins the address term and the port term with `and`; a term whose
/// input is absent is left out instead of leaving a bare connective, and a
/// clause with neither term matches any address in that direction.
pub fn build(request: &EndpointFilterRequest) -> String {
    let clauses: Vec<String> = Direction::ALL
        .iter()
        .map(|direction| match request.purpose {
            Purpose::Capture => capture_clause(&request.endpoint, *direction),
            Purpose::Display => display_clause(&request.endpoint, *direction),
        })
        .collect();

    let expression = format!("{}({})", request.filter_goal.prefix(), clauses.join(" or "));
    trace!("built {} filter: {}", request.purpose, expression);
    expression
}

/// libpcap filter for an endpoint
pub fn tcpdump_endpoint_filter(endpoint: &Endpoint, goal: FilterGoal) -> String {
    build(&EndpointFilterRequest::new(Purpose::Capture, endpoint.clone(), goal))
}

/// Wireshark display filter for an endpoint
pub fn wireshark_endpoint_filter(endpoint: &Endpoint, goal: FilterGoal) -> String {
    build(&EndpointFilterRequest::new(Purpose::Display, endpoint.clone(), goal))
}

/// Join per-endpoint expressions into one filter.
///
/// Exclusions must all hold, so they are joined with `and`; inclusions
/// match any of the endpoints and are joined with `or`.
pub fn combine<I, S>(expressions: I, goal: FilterGoal) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let connective = match goal {
        FilterGoal::Include => " or ",
        FilterGoal::Exclude => " and ",
    };

    expressions
        .into_iter()
        .filter(|e| !e.as_ref().is_empty())
        .map(|e| e.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(connective)
}

/// Build one filter covering every endpoint in the list
pub fn build_for_endpoints(endpoints: &[Endpoint], purpose: Purpose, goal: FilterGoal) -> String {
    combine(
        endpoints
            .iter()
            .map(|e| build(&EndpointFilterRequest::new(purpose, e.clone(), goal))),
        goal,
    )
}

fn capture_clause(endpoint: &Endpoint, direction: Direction) -> String {
    let dir = direction.keyword();

    let port_term = port_of(endpoint).map(|port| match endpoint.protocol.as_deref() {
        Some(proto) => format!("{proto} {dir} port {port}"),
        None => format!("{dir} port {port}"),
    });

    let clause = match (endpoint.address.as_deref(), port_term) {
        (Some(addr), Some(port)) => {
            format!("{dir} {} {addr} and {port}", host_or_net(endpoint))
        }
        (Some(addr), None) => format!("{dir} {} {addr}", host_or_net(endpoint)),
        (None, Some(port)) => port,
        (None, None) => format!("{dir} any"),
    };

    format!("({clause})")
}

/// Port 0 never names a real endpoint and is treated as absent
fn port_of(endpoint: &Endpoint) -> Option<u16> {
    endpoint.port.filter(|port| *port != 0)
}

fn host_or_net(endpoint: &Endpoint) -> &'static str {
    if endpoint.is_network() {
        "net"
    } else {
        "host"
    }
}

fn display_clause(endpoint: &Endpoint, direction: Direction) -> String {
    let dir = direction.keyword();

    let addr_term = endpoint
        .address
        .as_deref()
        .map(|addr| format!("ip.{dir} == {addr}"));

    let port_term = port_of(endpoint).map(|port| match endpoint.protocol.as_deref() {
        Some(proto) => format!("{proto}.{dir}port == {port}"),
        None => {
            let alternatives: Vec<String> = DISPLAY_PORT_PROTOCOLS
                .iter()
                .map(|proto| format!("{proto}.{dir}port == {port}"))
                .collect();
            format!("({})", alternatives.join(" or "))
        }
    });

    let clause = match (addr_term, port_term) {
        (Some(addr), Some(port)) => format!("{addr} and {port}"),
        (Some(addr), None) => addr,
        (None, Some(port)) => port,
        (None, None) => "ip.any == any".to_string(),
    };

    format!("({clause})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(proto: Option<&str>, addr: Option<&str>, port: Option<u16>) -> Endpoint {
        Endpoint::new(proto, addr, port)
    }

    #[test]
    fn capture_host_with_port() {
        let filter = tcpdump_endpoint_filter(
            &endpoint(Some("tcp"), Some("192.168.1.1"), Some(80)),
            FilterGoal::Exclude,
        );
        assert_eq!(
            filter,
            "not ((src host 192.168.1.1 and tcp src port 80) or (dst host 192.168.1.1 and tcp dst port 80))"
        );
    }

    #[test]
    fn capture_port_only_has_no_dangling_and() {
        let filter = tcpdump_endpoint_filter(&endpoint(Some("udp"), None, Some(53)), FilterGoal::Include);
        assert_eq!(filter, "((udp src port 53) or (udp dst port 53))");
    }

    #[test]
    fn capture_without_protocol() {
        let filter = tcpdump_endpoint_filter(&endpoint(None, None, Some(443)), FilterGoal::Include);
        assert_eq!(filter, "((src port 443) or (dst port 443))");
    }

    #[test]
    fn capture_wildcard() {
        let filter = tcpdump_endpoint_filter(&Endpoint::default(), FilterGoal::Exclude);
        assert_eq!(filter, "not ((src any) or (dst any))");
    }

    #[test]
    fn capture_network_without_port() {
        let filter = tcpdump_endpoint_filter(&endpoint(Some("tcp"), Some("10.0.0.0/8"), None), FilterGoal::Include);
        assert_eq!(filter, "((src net 10.0.0.0/8) or (dst net 10.0.0.0/8))");
    }

    #[test]
    fn zero_port_is_absent() {
        let ep = endpoint(Some("tcp"), Some("10.0.0.1"), Some(0));
        assert_eq!(
            tcpdump_endpoint_filter(&ep, FilterGoal::Include),
            "((src host 10.0.0.1) or (dst host 10.0.0.1))"
        );
        assert_eq!(
            wireshark_endpoint_filter(&ep, FilterGoal::Include),
            "((ip.src == 10.0.0.1) or (ip.dst == 10.0.0.1))"
        );
    }

    #[test]
    fn display_wildcard() {
        let filter = wireshark_endpoint_filter(&Endpoint::default(), FilterGoal::Include);
        assert_eq!(filter, "((ip.any == any) or (ip.any == any))");
    }

    #[test]
    fn display_port_without_protocol() {
        let filter = wireshark_endpoint_filter(&endpoint(None, Some("10.0.0.1"), Some(53)), FilterGoal::Include);
        assert_eq!(
            filter,
            "((ip.src == 10.0.0.1 and (tcp.srcport == 53 or udp.srcport == 53)) or \
             (ip.dst == 10.0.0.1 and (tcp.dstport == 53 or udp.dstport == 53)))"
        );
    }

    #[test]
    fn combine_uses_goal_connective() {
        assert_eq!(combine(["a", "b"], FilterGoal::Exclude), "a and b");
        assert_eq!(combine(["a", "", "b"], FilterGoal::Include), "a or b");
        assert_eq!(combine(Vec::<String>::new(), FilterGoal::Include), "");
    }

    #[test]
    fn build_for_endpoints_joins_each_endpoint() {
        let endpoints = vec![
            endpoint(Some("tcp"), Some("1.1.1.1"), None),
            endpoint(Some("udp"), None, Some(53)),
        ];
        let filter = build_for_endpoints(&endpoints, Purpose::Capture, FilterGoal::Exclude);
        assert_eq!(
            filter,
            "not ((src host 1.1.1.1) or (dst host 1.1.1.1)) and not ((udp src port 53) or (udp dst port 53))"
        );
    }
}
