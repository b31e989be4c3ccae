//! Unit tests for the printer and the XML dump.

use pretty_assertions::assert_eq;

use crate::{
    ast::{ast::Program, statements::Stmt},
    parser::parser::parse_source,
    type_checker::type_checker::type_check,
};

use super::{
    printer::{print_expr, print_program},
    xml::{escape, expr_to_xml, program_to_xml},
};

fn parse(source: &str) -> Program {
    parse_source(source, "render.pas").expect("source should parse")
}

fn checked(source: &str) -> Program {
    let mut program = parse(source);
    type_check(&mut program).expect("source should type check");
    program
}

#[test]
fn test_print_program() {
    let source = "program Demo;
        const limit = 3;
        var a, b: integer; r: real; name: string;
        function twice(n: integer): integer; begin twice := n * 2 end;
        procedure greet(who: string; times: integer); begin writeln('hi ', who) end;
        begin
            a := -twice(limit) + 1;
            if not (a < b) then r := a / 2 else begin read(a, b); greet('it''s', a) end;
            while a > 0 do a := a - 1;
            repeat a := a + 1; b := b mod 2 until a = 10;
            for a := 10 downto 1 do write(a)
        end.";

    let expected = "program Demo;
const
   limit = 3;
var
   a, b : integer;
   r : real;
   name : string;

function twice (n: integer) : integer;
begin
   twice := (n * 2)
end;

procedure greet (who: string; times: integer);
begin
   writeln ('hi ', who)
end;
begin
   a := (-twice (limit) + 1);
   if not (a < b) then
      r := (a / 2)
   else
      begin
         read (a, b);
         greet ('it''s', a)
      end;
   while (a > 0) do
      a := (a - 1);
   repeat
      a := (a + 1);
      b := (b mod 2)
   until (a = 10);
   for a := 10 downto 1 do
      write (a)
end.
";

    assert_eq!(print_program(&parse(source)), expected);
}

#[test]
fn test_print_omits_casts() {
    let program = checked("program T; var r: real; begin r := 1 + 2.5 end.");

    match &program.block.body.body[0] {
        Stmt::Assign(assign) => assert_eq!(print_expr(&assign.value), "(1 + 2.5)"),
        other => panic!("expected an assignment, found {:?}", other),
    }
}

#[test]
fn test_printed_source_reparses() {
    let source = "program T; var s: string; c: char; i: integer;
        begin s := 'a' + 'b''c'; c := ''''; i := (1 + 2) * 3 - -4; writeln(s, c, i) end.";

    let first = print_program(&parse(source));
    let second = print_program(&parse(&first));

    assert_eq!(second, first);
}

#[test]
fn test_expr_xml() {
    let program = checked("program T; var r: real; i: integer; begin r := i * 2.5 end.");

    let expected = r#"<Binary Op="Star" Type="real">
  <TypeCast Type="real">
    <Ident Name="i" Type="integer"/>
  </TypeCast>
  <Literal Value="2.5" Type="real"/>
</Binary>
"#;
    match &program.block.body.body[0] {
        Stmt::Assign(assign) => assert_eq!(expr_to_xml(&assign.value), expected),
        other => panic!("expected an assignment, found {:?}", other),
    }
}

#[test]
fn test_program_xml() {
    let program = checked("program T; var x: integer; begin if x < 1 then writeln('<ok>') end.");

    let expected = r#"<Program Name="T">
  <Block>
    <Declarations>
      <Var Name="x" Type="integer"/>
    </Declarations>
    <Compound>
      <If>
        <Binary Op="Less" Type="boolean">
          <Ident Name="x" Type="integer"/>
          <Literal Value="1" Type="integer"/>
        </Binary>
        <Then>
          <Write NewLine="true">
            <Literal Value="&lt;ok&gt;" Type="string"/>
          </Write>
        </Then>
      </If>
    </Compound>
  </Block>
</Program>
"#;

    assert_eq!(program_to_xml(&program), expected);
}

#[test]
fn test_untyped_xml_has_no_type() {
    let program = parse("program T; begin x := y end.");

    match &program.block.body.body[0] {
        Stmt::Assign(assign) => assert_eq!(expr_to_xml(&assign.value), "<Ident Name=\"y\"/>\n"),
        other => panic!("expected an assignment, found {:?}", other),
    }
}

#[test]
fn test_escape() {
    assert_eq!(escape(r#"a<b & "c" 'd'"#), "a&lt;b &amp; &quot;c&quot; &apos;d&apos;");
}

#[test]
fn test_else_stays_with_outer_if() {
    let sources = [
        "program T; var a, b: boolean; x, y: integer; \
         begin if a then if b then x := 1;; else y := 2 end.",
        "program T; var a, b: boolean; x, y: integer; \
         begin if a then while b do if b then x := 1;; else y := 2 end.",
    ];

    for source in sources {
        let printed = print_program(&checked(source));
        let reparsed = checked(&printed);

        match &reparsed.block.body.body[0] {
            Stmt::If(outer) => {
                assert!(outer.else_body.is_some(), "{}", printed);
                assert!(matches!(outer.then_body.as_ref(), Stmt::Compound(_)), "{}", printed);
            }
            other => panic!("expected an if statement, found {:?}", other),
        }
        assert_eq!(print_program(&reparsed), printed);
    }

    let printed = print_program(&checked(sources[0]));
    assert!(printed.ends_with(
        "begin
   if a then
      begin
         if b then
            x := 1
      end
   else
      y := 2
end.
"
    ));
}

#[test]
fn test_closed_inner_if_is_not_wrapped() {
    let source = "program T; var a, b: boolean; x: integer; \
                  begin if a then if b then x := 1 else x := 2 else x := 3 end.";

    let printed = print_program(&checked(source));
    assert!(!printed.contains("      begin"), "{}", printed);
    assert_eq!(print_program(&checked(&printed)), printed);
}
